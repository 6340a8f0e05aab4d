//! Numerical evaluation of expression trees against variable bindings.
//!
//! Evaluation is bottom-up and uses an explicit work stack, so arbitrarily
//! deep trees evaluate without recursion. Each operator node hands its
//! operand values to the operator's `eval` rule.
//!
//! # Example
//! ```
//! use symb_tensor::{Bindings, Value, evaluate, symb};
//!
//! let x = symb("eval_doc_x");
//! let e = x.to_expr().pow(2.0) + 1.0;
//! let b = Bindings::new().bind(x, 3.0);
//! assert_eq!(evaluate(&e, &b), Ok(Value::Scalar(10.0)));
//! ```

use crate::{Bindings, Expr, ExprKind, Value, XprError};

enum Step<'e> {
    Visit(&'e Expr),
    Apply(&'e Expr),
}

/// Evaluate an expression with the given variable bindings.
///
/// Numeric domain problems are not errors: they produce NaN or infinities
/// following IEEE semantics.
///
/// # Errors
/// - `UnboundVariable` if a variable has no binding
/// - `ShapeMismatch` if an operator receives values it cannot combine
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<Value, XprError> {
    let mut work = vec![Step::Visit(expr)];
    let mut values: Vec<Value> = Vec::new();

    while let Some(step) = work.pop() {
        match step {
            Step::Visit(e) => match &e.kind {
                ExprKind::Const(n) => values.push(Value::Scalar(*n)),
                ExprKind::Var(s) => {
                    let value = bindings
                        .get(*s)
                        .ok_or_else(|| XprError::UnboundVariable(s.to_string()))?;
                    values.push(value.clone());
                }
                ExprKind::Tensor(t) => values.push(Value::Tensor(t.as_ref().clone())),
                ExprKind::Op { args, .. } => {
                    work.push(Step::Apply(e));
                    // Reversed so operands are evaluated left to right
                    work.extend(args.iter().rev().map(|a| Step::Visit(a.as_ref())));
                }
            },
            Step::Apply(e) => {
                let (Some(op), arity) = (e.op(), e.args().len()) else {
                    continue;
                };
                let operands = values.split_off(values.len() - arity);
                let value = (op.eval)(&operands).ok_or_else(|| {
                    XprError::shape_mismatch(op.name, operands.iter().map(Value::shape))
                })?;
                log::trace!("eval {}({}) = {value}", op.name, DisplayList(&operands));
                values.push(value);
            }
        }
    }

    match values.pop() {
        Some(value) => Ok(value),
        None => unreachable!("every expression yields exactly one value"),
    }
}

struct DisplayList<'a>(&'a [Value]);

impl std::fmt::Display for DisplayList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl Expr {
    /// Evaluate with the given bindings; see [`evaluate`]
    ///
    /// # Errors
    /// As [`evaluate`].
    pub fn evaluate(&self, bindings: &Bindings) -> Result<Value, XprError> {
        evaluate(self, bindings)
    }
}
