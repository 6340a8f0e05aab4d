//! Capability traits that let host values act as operands.
//!
//! [`ScalarLike`] covers anything convertible to `f64`. [`Tensorial`] covers
//! anything with a known shape and row-major elements; scalars are the rank-0
//! case, and fixed arrays nest recursively, so `[[f64; 2]; 3]` has shape `(3, 2)`.

use num_traits::ToPrimitive;

use super::{Shape, Tensor};
use crate::XprError;

/// A value usable as a scalar operand
pub trait ScalarLike: Copy {
    fn to_scalar(self) -> f64;
}

impl<T: ToPrimitive + Copy> ScalarLike for T {
    #[inline]
    fn to_scalar(self) -> f64 {
        // Every primitive converts; NaN only for exotic ToPrimitive impls
        self.to_f64().unwrap_or(f64::NAN)
    }
}

/// A value with a known shape whose elements can be read in row-major order
pub trait Tensorial {
    /// Shape as reported by the leading entries along each axis
    fn shape(&self) -> Shape;

    /// Shape after checking that every entry along each axis agrees
    ///
    /// # Errors
    /// `Ragged` for entries of differing shape.
    fn checked_shape(&self) -> Result<Shape, XprError> {
        Ok(self.shape())
    }

    /// Append all elements to `out` in row-major order
    fn write_flat(&self, out: &mut Vec<f64>);

    fn is_scalar(&self) -> bool {
        self.shape().is_scalar()
    }

    fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.shape().count());
        self.write_flat(&mut out);
        out
    }
}

macro_rules! scalar_tensorial {
    ($($t:ty),* $(,)?) => {
        $(
            impl Tensorial for $t {
                #[inline]
                fn shape(&self) -> Shape {
                    Shape::scalar()
                }

                #[inline]
                fn write_flat(&self, out: &mut Vec<f64>) {
                    out.push(self.to_scalar());
                }
            }
        )*
    };
}

scalar_tensorial!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Shape of a sequence of entries, all of which must share one shape
fn uniform_shape<'a, T: Tensorial + 'a>(
    entries: impl IntoIterator<Item = &'a T>,
    len: usize,
) -> Result<Shape, XprError> {
    let mut inner: Option<Shape> = None;
    for entry in entries {
        let shape = entry.checked_shape()?;
        match &inner {
            Some(first) if *first != shape => {
                return Err(XprError::Ragged {
                    expected: first.clone(),
                    got: shape,
                });
            }
            Some(_) => {}
            None => inner = Some(shape),
        }
    }
    Ok(inner.unwrap_or_else(Shape::scalar).prepend(len))
}

impl<T: Tensorial, const N: usize> Tensorial for [T; N] {
    fn shape(&self) -> Shape {
        self.first()
            .map_or_else(Shape::scalar, Tensorial::shape)
            .prepend(N)
    }

    fn checked_shape(&self) -> Result<Shape, XprError> {
        uniform_shape(self, N)
    }

    fn write_flat(&self, out: &mut Vec<f64>) {
        for item in self {
            item.write_flat(out);
        }
    }
}

impl<T: Tensorial> Tensorial for Vec<T> {
    fn shape(&self) -> Shape {
        self.first()
            .map_or_else(Shape::scalar, Tensorial::shape)
            .prepend(self.len())
    }

    fn checked_shape(&self) -> Result<Shape, XprError> {
        uniform_shape(self, self.len())
    }

    fn write_flat(&self, out: &mut Vec<f64>) {
        for item in self {
            item.write_flat(out);
        }
    }
}

impl Tensorial for Tensor {
    fn shape(&self) -> Shape {
        Tensor::shape(self).clone()
    }

    fn write_flat(&self, out: &mut Vec<f64>) {
        out.extend_from_slice(self.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_like_conversions() {
        assert_eq!(3_i32.to_scalar(), 3.0);
        assert_eq!(2.5_f32.to_scalar(), 2.5);
        assert_eq!(7_usize.to_scalar(), 7.0);
    }

    #[test]
    fn test_nested_array_shape() {
        let m = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(m.shape(), Shape::new([2, 3]));
        assert_eq!(m.to_flat(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(!m.is_scalar());
        assert!(4.0_f64.is_scalar());
    }

    #[test]
    fn test_vec_shape() {
        let v = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        assert_eq!(v.shape(), Shape::new([3, 2]));
        assert_eq!(v.to_flat(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(v.checked_shape(), Ok(Shape::new([3, 2])));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let v = vec![vec![1.0], vec![2.0, 3.0], vec![]];
        assert!(matches!(v.checked_shape(), Err(XprError::Ragged { .. })));

        // Raggedness below the first axis is found too
        let nested = [vec![[1, 2], [3, 4]], vec![[5, 6]]];
        assert_eq!(
            nested.checked_shape(),
            Err(XprError::Ragged {
                expected: Shape::new([2, 2]),
                got: Shape::new([1, 2])
            })
        );
    }
}
