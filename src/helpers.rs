//! Multi-variable differentiation helpers
//!
//! Provides gradient, hessian, and jacobian computation functions.

use crate::{Expr, Symbol, derivative_of};

/// Compute the gradient of an expression with respect to multiple variables
/// Returns a vector of partial derivatives [∂f/∂x₁, ∂f/∂x₂, ...]
///
/// # Example
/// ```
/// use symb_tensor::{gradient, symb};
///
/// let (x, y) = (symb("grad_doc_x"), symb("grad_doc_y"));
/// let expr = x.to_expr().pow(2.0) + y.to_expr().pow(2.0);
/// let grad = gradient(&expr, &[x, y]);
/// assert_eq!(grad[0].to_string(), "2 * grad_doc_x");
/// assert_eq!(grad[1].to_string(), "2 * grad_doc_y");
/// ```
pub fn gradient(expr: &Expr, vars: &[Symbol]) -> Vec<Expr> {
    vars.iter().map(|&var| derivative_of(expr, var)).collect()
}

/// Compute the Hessian matrix of an expression
/// Returns a 2D vector of second partial derivatives
/// H[i][j] = ∂²f/∂xᵢ∂xⱼ
pub fn hessian(expr: &Expr, vars: &[Symbol]) -> Vec<Vec<Expr>> {
    gradient(expr, vars)
        .iter()
        .map(|partial| gradient(partial, vars))
        .collect()
}

/// Compute the Jacobian matrix of a vector of expressions
/// Returns a 2D vector where J[i][j] = ∂fᵢ/∂xⱼ
pub fn jacobian(exprs: &[Expr], vars: &[Symbol]) -> Vec<Vec<Expr>> {
    exprs.iter().map(|expr| gradient(expr, vars)).collect()
}
