//! Operator overloading for building expressions.
//!
//! `a + b`, `a - b`, `a * b`, `a / b` and `-a` go through the same checked
//! construction as [`Expr::apply`](super::Expr::apply) and panic on a static
//! shape mismatch; use the `try_*` methods to get an error instead.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Expr;
use crate::{Symbol, XprError, ops};

#[track_caller]
fn checked(result: Result<Expr, XprError>) -> Expr {
    match result {
        Ok(expr) => expr,
        Err(err) => panic!("{err}"),
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<R: Into<Expr>> $trait<R> for Expr {
            type Output = Expr;
            #[track_caller]
            fn $method(self, rhs: R) -> Expr {
                checked(self.$checked(rhs))
            }
        }

        impl<R: Into<Expr>> $trait<R> for &Expr {
            type Output = Expr;
            #[track_caller]
            fn $method(self, rhs: R) -> Expr {
                checked(self.clone().$checked(rhs))
            }
        }

        impl<R: Into<Expr>> $trait<R> for Symbol {
            type Output = Expr;
            #[track_caller]
            fn $method(self, rhs: R) -> Expr {
                checked(Expr::var(self).$checked(rhs))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;
            #[track_caller]
            fn $method(self, rhs: Expr) -> Expr {
                checked(Expr::number(self).$checked(rhs))
            }
        }

        impl $trait<&Expr> for f64 {
            type Output = Expr;
            #[track_caller]
            fn $method(self, rhs: &Expr) -> Expr {
                checked(Expr::number(self).$checked(rhs.clone()))
            }
        }

        impl $trait<Symbol> for f64 {
            type Output = Expr;
            #[track_caller]
            fn $method(self, rhs: Symbol) -> Expr {
                checked(Expr::number(self).$checked(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, try_add);
impl_binary_op!(Sub, sub, try_sub);
impl_binary_op!(Mul, mul, try_mul);
impl_binary_op!(Div, div, try_div);

impl Neg for Expr {
    type Output = Self;
    fn neg(self) -> Self {
        Self::build(&ops::NEG, vec![self])
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        -self.clone()
    }
}

impl Neg for Symbol {
    type Output = Expr;
    fn neg(self) -> Expr {
        -Expr::var(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::linalg::Tensor;
    use crate::{Expr, symb};

    #[test]
    fn test_mixed_operands() {
        let x = symb("ops_overload_x");
        let e = 2.0 * x + 1.0;
        assert_eq!(e.to_string(), "2 * ops_overload_x + 1");

        let by_ref = &e - &e;
        assert!(by_ref.is_zero_num());
    }

    #[test]
    fn test_negation() {
        let x = symb("ops_overload_neg");
        assert_eq!(-(-x), x.to_expr());
        assert_eq!(-Expr::number(3.0), Expr::number(-3.0));
    }

    #[test]
    #[should_panic(expected = "cannot combine operands")]
    fn test_mismatch_panics() {
        let a = Expr::tensor(Tensor::zeros([2]));
        let b = Expr::tensor(Tensor::zeros([3]));
        let _ = a + b;
    }
}
