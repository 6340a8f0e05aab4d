//! Structural hashing.
//!
//! Children contribute their cached hash, so hashing a new node is O(arity)
//! rather than O(tree size).

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::{ExprKind, const_bits};

/// Compute the structural hash of a node from its kind and its children's cached hashes
#[must_use]
pub fn compute_expr_hash(kind: &ExprKind) -> u64 {
    let mut hasher = FxHasher::default();
    std::mem::discriminant(kind).hash(&mut hasher);
    match kind {
        ExprKind::Const(n) => const_bits(*n).hash(&mut hasher),
        ExprKind::Var(s) => s.hash(&mut hasher),
        ExprKind::Tensor(t) => {
            t.shape().hash(&mut hasher);
            for &v in t.as_slice() {
                const_bits(v).hash(&mut hasher);
            }
        }
        ExprKind::Op { op, args } => {
            op.name.hash(&mut hasher);
            if op.commutative {
                // Commutative hash: order-insensitive sum of children hashes
                let mut sum_hash: u64 = 0;
                for a in args {
                    sum_hash = sum_hash.wrapping_add(a.hash);
                }
                sum_hash.hash(&mut hasher);
            } else {
                for a in args {
                    a.hash.hash(&mut hasher);
                }
            }
        }
    }
    hasher.finish()
}
