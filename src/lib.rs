//! Symbolic expressions over scalars and tensors
//!
//! A small engine for exact symbolic differentiation of expressions built
//! from constants, variables and tensor-valued quantities.
//!
//! # Features
//! - Immutable expression trees with structural hashing and equality
//! - Construction-time simplification (`0 + a → a`, `a * 1 → a`, `a^0 → 1`, ...)
//! - An open operator registry: each operator carries its own simplification,
//!   shape, evaluation, derivative and rendering rules
//! - Tensor constants with elementwise arithmetic, contraction and scaling
//! - Evaluation against variable bindings, standard and LaTeX rendering
//! - **Builder pattern API** for differentiation
//!
//! # Usage
//!
//! ```
//! use symb_tensor::{Bindings, Value, derivative_of, evaluate, make_variable};
//!
//! let x = make_variable("lib_doc_x");
//! let y = make_variable("lib_doc_y");
//! let expr = x.clone() + y.clone().pow(2.0);
//! assert_eq!(expr.to_string(), "lib_doc_x + lib_doc_y^2");
//!
//! let dy = derivative_of(&expr, "lib_doc_y");
//! let b = Bindings::new().bind("lib_doc_x", 1.0).bind("lib_doc_y", 3.0);
//! assert_eq!(evaluate(&dy, &b), Ok(Value::Scalar(6.0)));
//! ```
//!
//! ## Tensors
//! ```
//! use symb_tensor::{Bindings, Expr, Value, evaluate, make_tensor};
//!
//! let a = Expr::tensor(make_tensor([2, 2], [1.0, 2.0, 3.0, 4.0]).unwrap());
//! let b = Expr::tensor(make_tensor([2, 2], [4.0, 3.0, 2.0, 1.0]).unwrap());
//!
//! let sum = evaluate(&(a.clone() + b.clone()), &Bindings::new()).unwrap();
//! assert_eq!(sum.as_tensor().unwrap().as_slice(), &[5.0, 5.0, 5.0, 5.0]);
//!
//! // Tensor times tensor contracts to a scalar
//! assert_eq!(evaluate(&(a * b), &Bindings::new()), Ok(Value::Scalar(20.0)));
//! ```

mod builder;
mod core;
mod diff;
mod helpers;
pub mod linalg;
pub mod ops;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use builder::Diff;
pub use crate::core::{
    Bindings, Expr, ExprKind, FormatMode, Rendered, Renderer, Symbol, Value, XprError,
    compute_expr_hash, evaluate, render, symb, symb_anon, symb_get, symbol_exists,
};
pub use diff::derivative_of;
pub use helpers::{gradient, hessian, jacobian};
pub use linalg::{Dims, ScalarLike, Shape, Tensor, Tensorial};
pub use ops::{OperatorDef, Registry};

/// Default maximum expression depth accepted by [`Diff`]
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum expression node count accepted by [`Diff`]
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Constant leaf from any scalar-like value
pub fn make_constant(value: impl ScalarLike) -> Expr {
    Expr::number(value.to_scalar())
}

/// Variable leaf; the same name always yields the same variable
pub fn make_variable(name: &str) -> Expr {
    Expr::symbol(name)
}

/// Tensor from a shape and its elements in row-major order
///
/// # Errors
/// `ElementCount` if the number of elements does not match the shape.
pub fn make_tensor<T: ScalarLike>(
    shape: impl Into<Shape>,
    elements: impl IntoIterator<Item = T>,
) -> Result<Tensor, XprError> {
    Tensor::new(shape, elements)
}
