//! Dense, fixed-shape tensors of `f64`.

use std::fmt;
use std::ops::Index;

use super::{ScalarLike, Shape, Tensorial};
use crate::XprError;

/// Dense tensor stored in row-major order.
///
/// The shape never changes after construction, and every arithmetic
/// operation allocates a fresh tensor. Equality is deep and elementwise;
/// tensors of different shapes compare unequal.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Shape,
    values: Vec<f64>,
}

impl Tensor {
    /// Create a tensor from a shape and exactly `shape.count()` row-major values.
    ///
    /// # Errors
    /// `ElementCount` if the number of values does not match the shape.
    pub fn new<T: ScalarLike>(
        shape: impl Into<Shape>,
        values: impl IntoIterator<Item = T>,
    ) -> Result<Self, XprError> {
        let shape = shape.into();
        let values: Vec<f64> = values.into_iter().map(ScalarLike::to_scalar).collect();
        if values.len() != shape.count() {
            return Err(XprError::ElementCount {
                expected: shape.count(),
                got: values.len(),
                shape,
            });
        }
        Ok(Self { shape, values })
    }

    /// Tensor with every element set to `value`
    pub fn filled(shape: impl Into<Shape>, value: f64) -> Self {
        let shape = shape.into();
        let values = vec![value; shape.count()];
        Self { shape, values }
    }

    pub fn zeros(shape: impl Into<Shape>) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Copy any [`Tensorial`] value (nested arrays, vectors, ...) into a tensor.
    ///
    /// # Errors
    /// `Ragged` if entries along some axis differ in shape.
    pub fn from_tensorial(value: &impl Tensorial) -> Result<Self, XprError> {
        Self::new(value.checked_shape()?, value.to_flat())
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Checked element access by multi-index.
    ///
    /// # Errors
    /// `RankMismatch` or `IndexOutOfBounds` for an invalid index.
    pub fn get(&self, index: &[usize]) -> Result<f64, XprError> {
        let offset = self.shape.flat_index(index)?;
        Ok(self.values[offset])
    }

    /// Apply `f` to every element
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            shape: self.shape.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two tensors of identical shape elementwise; `None` if the shapes differ
    #[must_use]
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Option<Self> {
        (self.shape == other.shape).then(|| Self {
            shape: self.shape.clone(),
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Multiply every element by a scalar
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Elementwise scalar power
    #[must_use]
    pub fn powf(&self, exponent: f64) -> Self {
        self.map(|v| v.powf(exponent))
    }

    /// Elementwise sum.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn add(&self, other: &Self) -> Result<Self, XprError> {
        self.zip_with(other, |a, b| a + b)
            .ok_or_else(|| self.mismatch("add", other))
    }

    /// Elementwise difference.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn sub(&self, other: &Self) -> Result<Self, XprError> {
        self.zip_with(other, |a, b| a - b)
            .ok_or_else(|| self.mismatch("sub", other))
    }

    /// Elementwise (Hadamard) product.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn hadamard(&self, other: &Self) -> Result<Self, XprError> {
        self.zip_with(other, |a, b| a * b)
            .ok_or_else(|| self.mismatch("hadamard", other))
    }

    /// Full inner-product contraction: `Σ a[i] * b[i]` over every index.
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ.
    pub fn dot(&self, other: &Self) -> Result<f64, XprError> {
        if self.shape != other.shape {
            return Err(self.mismatch("mul", other));
        }
        Ok(self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .sum())
    }

    fn mismatch(&self, op: &'static str, other: &Self) -> XprError {
        XprError::shape_mismatch(op, [&self.shape, &other.shape])
    }

    fn fmt_axis(&self, f: &mut fmt::Formatter<'_>, axis: usize, offset: usize) -> fmt::Result {
        let extents = self.shape.extents();
        if axis == extents.len() {
            return write!(f, "{}", self.values[offset]);
        }
        let stride: usize = extents[axis + 1..].iter().product();
        write!(f, "[")?;
        for i in 0..extents[axis] {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.fmt_axis(f, axis + 1, offset + i * stride)?;
        }
        write!(f, "]")
    }
}

impl Index<&[usize]> for Tensor {
    type Output = f64;

    /// # Panics
    /// Panics if the index is out of bounds; use [`Tensor::get`] for a checked lookup.
    fn index(&self, index: &[usize]) -> &f64 {
        match self.shape.flat_index(index) {
            Ok(offset) => &self.values[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f64;

    fn index(&self, index: [usize; N]) -> &f64 {
        &self[&index[..]]
    }
}

impl fmt::Display for Tensor {
    /// Nested brackets, one level per axis: `[[1, 2], [3, 4]]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            return write!(f, "[]");
        }
        self.fmt_axis(f, 0, 0)
    }
}
