//! Parallel batch evaluation using Rayon
//!
//! Evaluates expressions over many binding sets at once.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! symb_tensor = { version = "0.1", features = ["parallel"] }
//! ```

use rayon::prelude::*;

use crate::{Bindings, Expr, Value, XprError, evaluate};

/// Evaluate one expression at every binding set, in parallel.
///
/// Results are returned in the order of `points`; each point fails or
/// succeeds on its own.
pub fn evaluate_batch(expr: &Expr, points: &[Bindings]) -> Vec<Result<Value, XprError>> {
    points.par_iter().map(|b| evaluate(expr, b)).collect()
}

/// Evaluate several expressions at the same binding set, in parallel
pub fn evaluate_many(exprs: &[Expr], bindings: &Bindings) -> Vec<Result<Value, XprError>> {
    exprs.par_iter().map(|e| evaluate(e, bindings)).collect()
}
