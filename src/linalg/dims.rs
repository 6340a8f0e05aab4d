//! Statically inferred operand shapes.
//!
//! Every expression node carries a [`Dims`] computed at construction so that
//! shape conflicts between known operands are rejected before evaluation.
//! Variables have no shape until they are bound, so they start out `Unknown`
//! and any check involving them is deferred to evaluation.

use std::fmt;

use super::Shape;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dims {
    Scalar,
    Tensor(Shape),
    Unknown,
}

impl Dims {
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar)
    }

    #[inline]
    #[must_use]
    pub const fn is_tensor(&self) -> bool {
        matches!(self, Self::Tensor(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    #[must_use]
    pub const fn shape(&self) -> Option<&Shape> {
        match self {
            Self::Tensor(shape) => Some(shape),
            _ => None,
        }
    }

    /// Operands must agree exactly (scalar with scalar, tensor with same-shape tensor)
    #[must_use]
    pub fn same(a: &Self, b: &Self) -> Option<Self> {
        match (a, b) {
            (Self::Unknown, other) | (other, Self::Unknown) => Some(other.clone()),
            (Self::Scalar, Self::Scalar) => Some(Self::Scalar),
            (Self::Tensor(x), Self::Tensor(y)) if x == y => Some(a.clone()),
            _ => None,
        }
    }

    /// A scalar operand broadcasts over a tensor; two tensors must share a shape
    #[must_use]
    pub fn broadcast(a: &Self, b: &Self) -> Option<Self> {
        match (a, b) {
            (Self::Scalar, other) | (other, Self::Scalar) => Some(other.clone()),
            (Self::Unknown, other) | (other, Self::Unknown) => Some(other.clone()),
            (Self::Tensor(x), Self::Tensor(y)) if x == y => Some(a.clone()),
            _ => None,
        }
    }

    /// Scaling by a scalar keeps the tensor; two same-shape tensors contract to a scalar
    #[must_use]
    pub fn contract(a: &Self, b: &Self) -> Option<Self> {
        match (a, b) {
            (Self::Scalar, other) | (other, Self::Scalar) => Some(other.clone()),
            (Self::Unknown, _) | (_, Self::Unknown) => Some(Self::Unknown),
            (Self::Tensor(x), Self::Tensor(y)) if x == y => Some(Self::Scalar),
            _ => None,
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Tensor(shape) => write!(f, "{shape}"),
            Self::Unknown => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(extents: &[usize]) -> Dims {
        Dims::Tensor(Shape::from(extents))
    }

    #[test]
    fn test_same_requires_matching_shapes() {
        assert_eq!(Dims::same(&t(&[2]), &t(&[2])), Some(t(&[2])));
        assert_eq!(Dims::same(&t(&[2]), &t(&[3])), None);
        assert_eq!(Dims::same(&Dims::Scalar, &t(&[3])), None);
        assert_eq!(Dims::same(&Dims::Unknown, &t(&[3])), Some(t(&[3])));
    }

    #[test]
    fn test_broadcast_lets_scalars_through() {
        assert_eq!(Dims::broadcast(&Dims::Scalar, &t(&[2, 2])), Some(t(&[2, 2])));
        assert_eq!(Dims::broadcast(&Dims::Unknown, &Dims::Scalar), Some(Dims::Unknown));
        assert_eq!(Dims::broadcast(&t(&[2]), &t(&[4])), None);
    }

    #[test]
    fn test_contract_reduces_tensor_pairs() {
        assert_eq!(Dims::contract(&t(&[2, 2]), &t(&[2, 2])), Some(Dims::Scalar));
        assert_eq!(Dims::contract(&t(&[2, 2]), &Dims::Scalar), Some(t(&[2, 2])));
        assert_eq!(Dims::contract(&t(&[2]), &Dims::Unknown), Some(Dims::Unknown));
        assert_eq!(Dims::contract(&t(&[2]), &t(&[3])), None);
    }
}
