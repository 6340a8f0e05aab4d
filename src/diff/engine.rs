//! Differentiation engine
//!
//! Post-order walk over the tree. Leaves are handled here; every
//! operator node dispatches to its operator's derivative rule with the
//! operands and their derivatives. Rules build their result through the
//! normal construction path, so `0 * a`, `a + 0` and friends collapse as the
//! derivative is assembled.

use rustc_hash::FxHashSet;

use crate::{Expr, ExprKind, Symbol};

enum Task<'e> {
    Visit(&'e Expr),
    Combine(&'e Expr),
}

impl Expr {
    /// Differentiate this expression with respect to a variable
    ///
    /// Post-order over an explicit work stack, so tree depth is bounded only
    /// by memory.
    ///
    /// # Arguments
    /// * `var` - Variable to differentiate with respect to
    /// * `fixed_vars` - Variables treated as constants
    pub(crate) fn derive(&self, var: Symbol, fixed_vars: &FxHashSet<Symbol>) -> Self {
        let mut work = vec![Task::Visit(self)];
        let mut primes: Vec<Self> = Vec::new();

        while let Some(task) = work.pop() {
            match task {
                Task::Visit(e) => match &e.kind {
                    // Base cases
                    ExprKind::Const(_) | ExprKind::Tensor(_) => primes.push(Self::zero()),
                    ExprKind::Var(s) => primes.push(if *s == var && !fixed_vars.contains(s) {
                        Self::one()
                    } else {
                        Self::zero()
                    }),
                    ExprKind::Op { args, .. } => {
                        work.push(Task::Combine(e));
                        work.extend(args.iter().rev().map(|a| Task::Visit(a.as_ref())));
                    }
                },
                Task::Combine(e) => {
                    let (Some(op), args) = (e.op(), e.args()) else {
                        continue;
                    };
                    let own = primes.split_off(primes.len() - args.len());

                    // Constant with respect to `var`
                    if own.iter().all(Self::is_zero_num) {
                        primes.push(Self::zero());
                        continue;
                    }

                    log::trace!("d/d{var} of '{}' node", op.name);
                    primes.push((op.derivative)(args, &own));
                }
            }
        }

        primes.pop().unwrap_or_else(Self::zero)
    }
}

/// Derivative of `expr` with respect to `var`.
///
/// Total: differentiation never fails. The result is already simplified by
/// the construction rules; a shape conflict introduced while building it is
/// reported when the derivative is evaluated.
///
/// # Example
/// ```
/// use symb_tensor::{Bindings, Value, derivative_of, evaluate, symb};
///
/// let x = symb("derivative_doc_x");
/// let d = derivative_of(&x.to_expr().pow(3.0), x);
/// let b = Bindings::new().bind(x, 2.0);
/// assert_eq!(evaluate(&d, &b), Ok(Value::Scalar(12.0)));
/// ```
pub fn derivative_of(expr: &Expr, var: impl Into<Symbol>) -> Expr {
    expr.derive(var.into(), &FxHashSet::default())
}
