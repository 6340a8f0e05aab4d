//! Structural queries over expression trees.
//!
//! Traversals use an explicit stack so that deep trees cannot overflow.

use rustc_hash::FxHashSet;

use super::{Expr, ExprKind};
use crate::Symbol;

impl Expr {
    /// Count the total number of nodes in the tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            count += 1;
            stack.extend(e.args().iter().map(AsRef::as_ref));
        }
        count
    }

    /// Get the maximum nesting depth of the tree (a leaf has depth 1)
    #[must_use]
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((e, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(e.args().iter().map(|a| (a.as_ref(), depth + 1)));
        }
        deepest
    }

    /// Variables of the expression in order of first appearance (left to right)
    #[must_use]
    pub fn variables(&self) -> Vec<Symbol> {
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            match &e.kind {
                ExprKind::Var(s) => {
                    if seen.insert(*s) {
                        found.push(*s);
                    }
                }
                ExprKind::Op { args, .. } => stack.extend(args.iter().rev().map(AsRef::as_ref)),
                ExprKind::Const(_) | ExprKind::Tensor(_) => {}
            }
        }
        found
    }

    /// Check if the expression contains a specific variable
    #[must_use]
    pub fn contains_var(&self, var: Symbol) -> bool {
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            match &e.kind {
                ExprKind::Var(s) if *s == var => return true,
                ExprKind::Op { args, .. } => stack.extend(args.iter().map(AsRef::as_ref)),
                _ => {}
            }
        }
        false
    }
}
