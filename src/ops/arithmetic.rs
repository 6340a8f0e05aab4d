//! Arithmetic operators: add, sub, mul, hadamard, div, neg
//!
//! `mul` of two same-shape tensors is the full inner-product contraction;
//! `hadamard` is the elementwise product that derivative rules of elementwise
//! operators use so that tensor operands keep their shape.

use std::sync::Arc;

use super::elementary::POW;
use super::registry::OperatorDef;
use super::{
    fold_binary, fold_unary, operand, precedence, render_fraction, render_infix, render_prefix,
    shape_broadcast, shape_contract, shape_same, shape_unary, unary_operand,
};
use crate::{Expr, Value};

pub static ADD: OperatorDef = OperatorDef {
    name: "add",
    symbol: "+",
    latex: "+",
    arity: 2,
    commutative: true,
    precedence: precedence::ADD,
    simplify: add_simplify,
    shape: shape_same,
    eval: add_eval,
    derivative: add_derivative,
    render: render_infix,
};

pub static SUB: OperatorDef = OperatorDef {
    name: "sub",
    symbol: "-",
    latex: "-",
    arity: 2,
    commutative: false,
    precedence: precedence::ADD,
    simplify: sub_simplify,
    shape: shape_same,
    eval: sub_eval,
    derivative: sub_derivative,
    render: render_infix,
};

pub static MUL: OperatorDef = OperatorDef {
    name: "mul",
    symbol: "*",
    latex: "\\cdot",
    arity: 2,
    commutative: true,
    precedence: precedence::MUL,
    simplify: mul_simplify,
    shape: shape_contract,
    eval: mul_eval,
    derivative: mul_derivative,
    render: render_infix,
};

pub static HADAMARD: OperatorDef = OperatorDef {
    name: "hadamard",
    symbol: ".*",
    latex: "\\odot",
    arity: 2,
    commutative: true,
    precedence: precedence::MUL,
    simplify: hadamard_simplify,
    shape: shape_broadcast,
    eval: hadamard_eval,
    derivative: hadamard_derivative,
    render: render_infix,
};

pub static DIV: OperatorDef = OperatorDef {
    name: "div",
    symbol: "/",
    latex: "\\frac",
    arity: 2,
    commutative: false,
    precedence: precedence::MUL,
    simplify: div_simplify,
    shape: shape_broadcast,
    eval: div_eval,
    derivative: div_derivative,
    render: render_fraction,
};

pub static NEG: OperatorDef = OperatorDef {
    name: "neg",
    symbol: "-",
    latex: "-",
    arity: 1,
    commutative: false,
    precedence: precedence::NEG,
    simplify: neg_simplify,
    shape: shape_unary,
    eval: neg_eval,
    derivative: neg_derivative,
    render: render_prefix,
};

// ===== Builders used by derivative rules (inherit simplification) =====

pub(crate) fn add(a: Expr, b: Expr) -> Expr {
    Expr::build(&ADD, vec![a, b])
}

pub(crate) fn sub(a: Expr, b: Expr) -> Expr {
    Expr::build(&SUB, vec![a, b])
}

pub(crate) fn mul(a: Expr, b: Expr) -> Expr {
    Expr::build(&MUL, vec![a, b])
}

pub(crate) fn hadamard(a: Expr, b: Expr) -> Expr {
    Expr::build(&HADAMARD, vec![a, b])
}

pub(crate) fn div(a: Expr, b: Expr) -> Expr {
    Expr::build(&DIV, vec![a, b])
}

pub(crate) fn neg(a: Expr) -> Expr {
    Expr::build(&NEG, vec![a])
}

// ===== add =====

fn add_simplify(args: &[Expr]) -> Option<Expr> {
    let (a, b) = (&args[0], &args[1]);
    if a.is_zero_num() {
        return Some(b.clone());
    }
    if b.is_zero_num() {
        return Some(a.clone());
    }
    if a == b {
        return Some(mul(Expr::number(2.0), a.clone()));
    }
    fold_binary(args, |x, y| x + y)
}

fn add_eval(args: &[Value]) -> Option<Value> {
    match (&args[0], &args[1]) {
        (Value::Scalar(a), Value::Scalar(b)) => Some(Value::Scalar(a + b)),
        (Value::Tensor(a), Value::Tensor(b)) => a.add(b).ok().map(Value::Tensor),
        _ => None,
    }
}

fn add_derivative(_args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    // Sum rule: (a + b)' = a' + b'
    add(primes[0].clone(), primes[1].clone())
}

// ===== sub =====

fn sub_simplify(args: &[Expr]) -> Option<Expr> {
    let (a, b) = (&args[0], &args[1]);
    if b.is_zero_num() {
        return Some(a.clone());
    }
    if a.is_zero_num() {
        return Some(neg(b.clone()));
    }
    // A tensor minus itself is a zero tensor, not the scalar zero
    if a == b && !a.dims().is_tensor() {
        return Some(Expr::zero());
    }
    fold_binary(args, |x, y| x - y)
}

fn sub_eval(args: &[Value]) -> Option<Value> {
    match (&args[0], &args[1]) {
        (Value::Scalar(a), Value::Scalar(b)) => Some(Value::Scalar(a - b)),
        (Value::Tensor(a), Value::Tensor(b)) => a.sub(b).ok().map(Value::Tensor),
        _ => None,
    }
}

fn sub_derivative(_args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    sub(primes[0].clone(), primes[1].clone())
}

// ===== mul =====

fn mul_simplify(args: &[Expr]) -> Option<Expr> {
    let (a, b) = (&args[0], &args[1]);
    if a.is_zero_num() || b.is_zero_num() {
        return Some(Expr::zero());
    }
    if a.is_one_num() {
        return Some(b.clone());
    }
    if b.is_one_num() {
        return Some(a.clone());
    }
    fold_binary(args, |x, y| x * y)
}

fn mul_eval(args: &[Value]) -> Option<Value> {
    match (&args[0], &args[1]) {
        (Value::Scalar(a), Value::Scalar(b)) => Some(Value::Scalar(a * b)),
        (Value::Tensor(t), Value::Scalar(k)) | (Value::Scalar(k), Value::Tensor(t)) => {
            Some(Value::Tensor(t.scale(*k)))
        }
        (Value::Tensor(a), Value::Tensor(b)) => a.dot(b).ok().map(Value::Scalar),
    }
}

fn mul_derivative(args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    // Product rule: (a b)' = a' b + a b'  (bilinear, so it holds for contraction too)
    add(
        mul(primes[0].clone(), operand(&args[1])),
        mul(operand(&args[0]), primes[1].clone()),
    )
}

// ===== hadamard =====

fn hadamard_simplify(args: &[Expr]) -> Option<Expr> {
    let (a, b) = (&args[0], &args[1]);
    if a.is_zero_num() || b.is_zero_num() {
        return Some(Expr::zero());
    }
    if a.is_one_num() {
        return Some(b.clone());
    }
    if b.is_one_num() {
        return Some(a.clone());
    }
    // With a scalar operand the elementwise product is plain scaling
    if a.dims().is_scalar() || b.dims().is_scalar() {
        return Some(mul(a.clone(), b.clone()));
    }
    None
}

fn hadamard_eval(args: &[Value]) -> Option<Value> {
    match (&args[0], &args[1]) {
        (Value::Scalar(a), Value::Scalar(b)) => Some(Value::Scalar(a * b)),
        (Value::Tensor(t), Value::Scalar(k)) | (Value::Scalar(k), Value::Tensor(t)) => {
            Some(Value::Tensor(t.scale(*k)))
        }
        (Value::Tensor(a), Value::Tensor(b)) => a.hadamard(b).ok().map(Value::Tensor),
    }
}

fn hadamard_derivative(args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    add(
        hadamard(primes[0].clone(), operand(&args[1])),
        hadamard(operand(&args[0]), primes[1].clone()),
    )
}

// ===== div =====

fn div_simplify(args: &[Expr]) -> Option<Expr> {
    let (a, b) = (&args[0], &args[1]);
    if a.is_zero_num() {
        return Some(Expr::zero());
    }
    if b.is_one_num() {
        return Some(a.clone());
    }
    if a == b && !a.dims().is_tensor() {
        return Some(Expr::one());
    }
    fold_binary(args, |x, y| x / y)
}

fn div_eval(args: &[Value]) -> Option<Value> {
    args[0].zip_broadcast(&args[1], |a, b| a / b)
}

fn div_derivative(args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    // Quotient rule: (a / b)' = (a' b - a b') / b^2
    let (a, b) = (operand(&args[0]), operand(&args[1]));
    let numerator = sub(
        hadamard(primes[0].clone(), b.clone()),
        hadamard(a, primes[1].clone()),
    );
    let denominator = Expr::build(&POW, vec![b, Expr::number(2.0)]);
    div(numerator, denominator)
}

// ===== neg =====

fn neg_simplify(args: &[Expr]) -> Option<Expr> {
    let a = &args[0];
    if a.is_zero_num() {
        return Some(Expr::zero());
    }
    if let Some(inner) = unary_operand(a, &NEG) {
        return Some(operand(inner));
    }
    fold_unary(args, |x| -x)
}

fn neg_eval(args: &[Value]) -> Option<Value> {
    Some(args[0].map(|v| -v))
}

fn neg_derivative(_args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    neg(primes[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Tensor;
    use crate::symb;

    #[test]
    fn test_mul_identities() {
        let x = symb("arith_x").to_expr();
        assert_eq!(mul(x.clone(), Expr::one()), x);
        assert_eq!(mul(Expr::one(), x.clone()), x);
        assert!(mul(x.clone(), Expr::zero()).is_zero_num());
        assert_eq!(mul(Expr::number(3.0), Expr::number(4.0)), Expr::number(12.0));
    }

    #[test]
    fn test_sub_identities() {
        let x = symb("arith_sub_x").to_expr();
        assert_eq!(sub(x.clone(), Expr::zero()), x);
        assert!(sub(x.clone(), x.clone()).is_zero_num());
        assert_eq!(sub(Expr::zero(), x.clone()), neg(x));
    }

    #[test]
    fn test_eval_dispatches_on_operand_kinds() {
        let t = |v: f64| Value::Tensor(Tensor::filled([2], v));
        assert_eq!(add_eval(&[t(1.0), t(2.0)]), Some(t(3.0)));
        assert_eq!(sub_eval(&[t(1.0), t(2.0)]), Some(t(-1.0)));
        assert_eq!(add_eval(&[Value::Scalar(1.0), t(2.0)]), None);
        assert_eq!(mul_eval(&[Value::Scalar(3.0), t(2.0)]), Some(t(6.0)));
        assert_eq!(mul_eval(&[t(3.0), t(2.0)]), Some(Value::Scalar(12.0)));
        assert_eq!(hadamard_eval(&[t(3.0), t(2.0)]), Some(t(6.0)));
        assert_eq!(
            hadamard_eval(&[t(3.0), Value::Tensor(Tensor::filled([3], 1.0))]),
            None
        );
    }

    #[test]
    fn test_tensor_minus_itself_stays_a_node() {
        let t = Expr::tensor(Tensor::filled([2], 1.0));
        let diff = sub(t.clone(), t);
        assert_eq!(diff.op().map(|o| o.name), Some("sub"));
    }

    #[test]
    fn test_double_negation() {
        let x = symb("arith_neg_x").to_expr();
        assert_eq!(neg(neg(x.clone())), x);
        assert_eq!(neg(Expr::number(2.0)), Expr::number(-2.0));
    }

    #[test]
    fn test_hadamard_with_scalar_becomes_mul() {
        let x = symb("arith_had_x").to_expr();
        let e = hadamard(Expr::number(3.0), x);
        assert_eq!(e.op().map(|o| o.name), Some("mul"));
    }

    #[test]
    fn test_div_identities() {
        let x = symb("arith_div_x").to_expr();
        assert_eq!(div(x.clone(), Expr::one()), x);
        assert!(div(Expr::zero(), x.clone()).is_zero_num());
        assert!(div(x.clone(), x).is_one_num());
        // 1 / 0 is not folded into an infinite constant
        assert!(div(Expr::one(), Expr::zero()).op().is_some());
    }

    #[test]
    fn test_mul_eval_contracts_tensors() {
        let a = Value::Tensor(Tensor::new([2, 2], [1.0, 2.0, 3.0, 4.0]).unwrap());
        let b = Value::Tensor(Tensor::new([2, 2], [4.0, 3.0, 2.0, 1.0]).unwrap());
        assert_eq!(mul_eval(&[a.clone(), b]), Some(Value::Scalar(20.0)));
        assert_eq!(
            mul_eval(&[Value::Scalar(2.0), a]),
            Some(Value::Tensor(Tensor::new([2, 2], [2.0, 4.0, 6.0, 8.0]).unwrap()))
        );
    }
}
