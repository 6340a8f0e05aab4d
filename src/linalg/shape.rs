//! Tensor shapes and row-major multi-index arithmetic.

use std::fmt;

use crate::XprError;

/// Ordered per-axis extents of a tensor.
///
/// A rank-0 shape describes a single scalar. Elements are stored row-major:
/// the last axis varies fastest, so the flat offset of a multi-index is
/// `Σ idx[k] * Π extent[k+1..]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a shape from per-axis extents
    pub fn new(extents: impl Into<Vec<usize>>) -> Self {
        Self(extents.into())
    }

    /// The rank-0 shape of a scalar
    #[must_use]
    pub const fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Number of axes
    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn extents(&self) -> &[usize] {
        &self.0
    }

    /// Total number of elements (1 for a rank-0 shape)
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().product()
    }

    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Row-major strides: `stride[k] = Π extent[k+1..]`
    #[must_use]
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.rank()];
        for k in (0..self.rank().saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * self.0[k + 1];
        }
        strides
    }

    /// Resolve a multi-index to its flat row-major offset.
    ///
    /// # Errors
    /// `RankMismatch` if the index has the wrong number of components,
    /// `IndexOutOfBounds` if any component exceeds its axis extent.
    pub fn flat_index(&self, index: &[usize]) -> Result<usize, XprError> {
        if index.len() != self.rank() {
            return Err(XprError::RankMismatch {
                expected: self.rank(),
                got: index.len(),
            });
        }
        let mut offset = 0;
        for (&i, &extent) in index.iter().zip(&self.0) {
            if i >= extent {
                return Err(XprError::IndexOutOfBounds {
                    index: index.to_vec(),
                    shape: self.clone(),
                });
            }
            offset = offset * extent + i;
        }
        Ok(offset)
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `flat` is not below [`count`](Self::count).
    pub fn multi_index(&self, flat: usize) -> Result<Vec<usize>, XprError> {
        if flat >= self.count() {
            return Err(XprError::IndexOutOfBounds {
                index: vec![flat],
                shape: self.clone(),
            });
        }
        let mut index = vec![0; self.rank()];
        let mut rest = flat;
        for k in (0..self.rank()).rev() {
            index[k] = rest % self.0[k];
            rest /= self.0[k];
        }
        Ok(index)
    }

    /// Iterate over every valid multi-index in row-major order
    #[must_use]
    pub fn indices(&self) -> MdIndices<'_> {
        let next = (self.count() > 0).then(|| vec![0; self.rank()]);
        MdIndices { shape: self, next }
    }

    /// Shape with an extra leading axis
    pub(crate) fn prepend(&self, extent: usize) -> Self {
        let mut extents = Vec::with_capacity(self.rank() + 1);
        extents.push(extent);
        extents.extend_from_slice(&self.0);
        Self(extents)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(extents: Vec<usize>) -> Self {
        Self(extents)
    }
}

impl From<&[usize]> for Shape {
    fn from(extents: &[usize]) -> Self {
        Self(extents.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(extents: [usize; N]) -> Self {
        Self(extents.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, extent) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{extent}")?;
        }
        write!(f, ")")
    }
}

/// Row-major iterator over the multi-indices of a [`Shape`]
#[derive(Debug, Clone)]
pub struct MdIndices<'a> {
    shape: &'a Shape,
    next: Option<Vec<usize>>,
}

impl Iterator for MdIndices<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let extents = self.shape.extents();

        // Odometer increment, last axis fastest
        let mut successor = current.clone();
        for axis in (0..successor.len()).rev() {
            successor[axis] += 1;
            if successor[axis] < extents[axis] {
                self.next = Some(successor);
                break;
            }
            successor[axis] = 0;
        }
        Some(current)
    }
}
