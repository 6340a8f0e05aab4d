//! Immutable expression trees.
//!
//! This module defines:
//! - `Expr` - the central tree node type
//! - `ExprKind` - leaves (constants, variables, tensor constants) and operator nodes
//!
//! # Architecture
//!
//! ## Operator nodes
//! A composite node is an [`OperatorDef`] plus its ordered operands. The
//! descriptor carries every operator-specific rule (simplification, shape,
//! evaluation, derivative, rendering), so the tree itself knows nothing about
//! individual operators and new operators need no changes here.
//!
//! ## Structural Hashing
//! Each `Expr` has a pre-computed `hash` field for O(1) equality rejection.
//! Operands of commutative operators are hashed order-insensitively, and
//! compare equal in either order.
//!
//! ## Static shapes
//! Each node also carries its inferred [`Dims`], checked at construction.
//!
//! # Usage
//!
//! ```
//! use symb_tensor::{Expr, symb};
//!
//! let x = symb("expr_doc_x").to_expr();
//! let e = x.clone() + x.pow(2.0);
//! assert_eq!(e.to_string(), "expr_doc_x + expr_doc_x^2");
//! ```

mod analysis;
mod constructors;
mod hash;
mod operators;

use std::ops::Deref;
use std::sync::Arc;

use crate::Symbol;
use crate::linalg::{Dims, Tensor};
use crate::ops::OperatorDef;

pub use hash::compute_expr_hash;

// =============================================================================
// EXPR - The main expression type
// =============================================================================

/// A symbolic expression over scalars and tensors.
///
/// Expressions are immutable: every operator application builds a new
/// expression and runs the operator's simplification rules first.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Structural hash for O(1) equality rejection
    pub(crate) hash: u64,
    /// Statically inferred shape
    pub(crate) dims: Dims,
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Fast reject: different hashes mean definitely not equal
        if self.hash != other.hash {
            return false;
        }
        // Slow path: verify structural equality (handles hash collisions)
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

// =============================================================================
// EXPRKIND
// =============================================================================

/// The kind (structure) of an expression node
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Scalar constant; `0` and `1` are the zero and unit values
    Const(f64),

    /// Variable, resolved through bindings at evaluation time
    Var(Symbol),

    /// Tensor constant
    Tensor(Arc<Tensor>),

    /// Operator applied to ordered operands (count fixed by the operator's arity)
    Op {
        op: &'static OperatorDef,
        args: Vec<Arc<Expr>>,
    },
}

/// Bitwise float identity with `-0.0` folded into `0.0`
#[inline]
pub(crate) fn const_bits(n: f64) -> u64 {
    if n == 0.0 { 0.0_f64.to_bits() } else { n.to_bits() }
}

impl PartialEq for ExprKind {
    /// Structural equality, walked with an explicit stack
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Self, &Self)> = vec![(self, other)];

        while let Some((lhs, rhs)) = pending.pop() {
            match (lhs, rhs) {
                (Self::Const(a), Self::Const(b)) => {
                    if const_bits(*a) != const_bits(*b) {
                        return false;
                    }
                }
                (Self::Var(a), Self::Var(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Self::Tensor(a), Self::Tensor(b)) => {
                    let same = a.shape() == b.shape()
                        && a.as_slice()
                            .iter()
                            .zip(b.as_slice())
                            .all(|(x, y)| const_bits(*x) == const_bits(*y));
                    if !same {
                        return false;
                    }
                }
                (Self::Op { op: a, args: xs }, Self::Op { op: b, args: ys }) => {
                    if a.name != b.name || xs.len() != ys.len() {
                        return false;
                    }
                    // Commutative operands are paired up by hash
                    let swapped = a.commutative
                        && xs.len() == 2
                        && (xs[0].hash != ys[0].hash || xs[1].hash != ys[1].hash);
                    for (i, x) in xs.iter().enumerate() {
                        let y = if swapped { &ys[1 - i] } else { &ys[i] };
                        if Arc::ptr_eq(x, y) {
                            continue;
                        }
                        if x.hash != y.hash {
                            return false;
                        }
                        pending.push((&x.kind, &y.kind));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

// =============================================================================
// DROP IMPLEMENTATION - Iterative drop to prevent stack overflow
// =============================================================================

impl Drop for Expr {
    fn drop(&mut self) {
        let ExprKind::Op { args, .. } = &mut self.kind else {
            return;
        };
        let mut work_queue: Vec<Arc<Expr>> = std::mem::take(args);

        while let Some(child_arc) = work_queue.pop() {
            if let Ok(mut child_expr) = Arc::try_unwrap(child_arc)
                && let ExprKind::Op { args, .. } = &mut child_expr.kind
            {
                work_queue.extend(std::mem::take(args));
            }
        }
    }
}
