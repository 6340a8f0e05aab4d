//! Power, exponential and natural logarithm

use std::sync::Arc;

use super::arithmetic::{add, div, hadamard, sub};
use super::registry::OperatorDef;
use super::{
    fold_binary, fold_unary, operand, precedence, render_function, render_power, shape_unary,
    unary_operand,
};
use crate::linalg::Dims;
use crate::{Expr, Value};

pub static POW: OperatorDef = OperatorDef {
    name: "pow",
    symbol: "^",
    latex: "^",
    arity: 2,
    commutative: false,
    precedence: precedence::POW,
    simplify: pow_simplify,
    shape: pow_shape,
    eval: pow_eval,
    derivative: pow_derivative,
    render: render_power,
};

pub static EXP: OperatorDef = OperatorDef {
    name: "exp",
    symbol: "exp",
    latex: "\\exp",
    arity: 1,
    commutative: false,
    precedence: precedence::FUNCTION,
    simplify: exp_simplify,
    shape: shape_unary,
    eval: exp_eval,
    derivative: exp_derivative,
    render: render_function,
};

pub static LN: OperatorDef = OperatorDef {
    name: "ln",
    symbol: "ln",
    latex: "\\ln",
    arity: 1,
    commutative: false,
    precedence: precedence::FUNCTION,
    simplify: ln_simplify,
    shape: shape_unary,
    eval: ln_eval,
    derivative: ln_derivative,
    render: render_function,
};

pub(crate) fn pow(base: Expr, exponent: Expr) -> Expr {
    Expr::build(&POW, vec![base, exponent])
}

pub(crate) fn exp(a: Expr) -> Expr {
    Expr::build(&EXP, vec![a])
}

pub(crate) fn ln(a: Expr) -> Expr {
    Expr::build(&LN, vec![a])
}

// ===== pow =====

fn pow_simplify(args: &[Expr]) -> Option<Expr> {
    let (base, exponent) = (&args[0], &args[1]);
    // Rule order matters: 0^0 is 0 here
    if base.is_zero_num() {
        return Some(Expr::zero());
    }
    if base.is_one_num() || exponent.is_one_num() {
        return Some(base.clone());
    }
    if exponent.is_zero_num() {
        return Some(Expr::one());
    }
    fold_binary(args, f64::powf)
}

/// The exponent must be scalar; the result has the base's shape
fn pow_shape(dims: &[&Dims]) -> Option<Dims> {
    if dims[1].is_tensor() {
        return None;
    }
    Some(dims[0].clone())
}

fn pow_eval(args: &[Value]) -> Option<Value> {
    match (&args[0], &args[1]) {
        (Value::Scalar(b), Value::Scalar(e)) => Some(Value::Scalar(b.powf(*e))),
        (Value::Tensor(t), Value::Scalar(e)) => Some(Value::Tensor(t.powf(*e))),
        _ => None,
    }
}

fn pow_derivative(args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    // (a^b)' = b a^(b-1) a' + a^b ln(a) b'
    let (a, b) = (operand(&args[0]), operand(&args[1]));
    let (da, db) = (&primes[0], &primes[1]);

    let power_term = hadamard(
        hadamard(b.clone(), pow(a.clone(), sub(b.clone(), Expr::one()))),
        da.clone(),
    );
    // Annihilated when the exponent does not depend on the variable
    let exponential_term = hadamard(hadamard(pow(a.clone(), b), ln(a)), db.clone());
    add(power_term, exponential_term)
}

// ===== exp =====

fn exp_simplify(args: &[Expr]) -> Option<Expr> {
    let a = &args[0];
    if a.is_zero_num() {
        return Some(Expr::one());
    }
    if let Some(inner) = unary_operand(a, &LN) {
        return Some(operand(inner));
    }
    fold_unary(args, f64::exp)
}

fn exp_eval(args: &[Value]) -> Option<Value> {
    Some(args[0].map(f64::exp))
}

fn exp_derivative(args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    hadamard(exp(operand(&args[0])), primes[0].clone())
}

// ===== ln =====

fn ln_simplify(args: &[Expr]) -> Option<Expr> {
    let a = &args[0];
    if a.is_one_num() {
        return Some(Expr::zero());
    }
    if let Some(inner) = unary_operand(a, &EXP) {
        return Some(operand(inner));
    }
    fold_unary(args, f64::ln)
}

fn ln_eval(args: &[Value]) -> Option<Value> {
    Some(args[0].map(f64::ln))
}

fn ln_derivative(args: &[Arc<Expr>], primes: &[Expr]) -> Expr {
    div(primes[0].clone(), operand(&args[0]))
}
