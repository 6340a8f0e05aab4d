//! Concrete values and variable bindings used at evaluation time.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::linalg::{Dims, ScalarLike, Shape, Tensor, Tensorial};
use crate::{Symbol, XprError};

/// Result of evaluating an expression: a scalar or a tensor
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Tensor(Tensor),
}

impl Value {
    /// Convert any [`Tensorial`] host value; rank-0 values become scalars.
    ///
    /// # Errors
    /// `ElementCount` for ragged input.
    pub fn from_tensorial(value: &impl Tensorial) -> Result<Self, XprError> {
        let tensor = Tensor::from_tensorial(value)?;
        Ok(if tensor.shape().is_scalar() {
            Self::Scalar(tensor.as_slice()[0])
        } else {
            Self::Tensor(tensor)
        })
    }

    #[inline]
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Tensor(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Self::Tensor(t) => Some(t),
            Self::Scalar(_) => None,
        }
    }

    /// Shape of the value (rank 0 for scalars)
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::scalar(),
            Self::Tensor(t) => t.shape().clone(),
        }
    }

    #[must_use]
    pub fn dims(&self) -> Dims {
        match self {
            Self::Scalar(_) => Dims::Scalar,
            Self::Tensor(t) => Dims::Tensor(t.shape().clone()),
        }
    }

    /// Apply `f` to the scalar or to every tensor element
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(v) => Self::Scalar(f(*v)),
            Self::Tensor(t) => Self::Tensor(t.map(f)),
        }
    }

    /// Combine elementwise, letting a scalar operand broadcast over a tensor
    #[must_use]
    pub fn zip_broadcast(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Option<Self> {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Some(Self::Scalar(f(*a, *b))),
            (Self::Tensor(a), Self::Scalar(b)) => Some(Self::Tensor(a.map(|v| f(v, *b)))),
            (Self::Scalar(a), Self::Tensor(b)) => Some(Self::Tensor(b.map(|v| f(*a, v)))),
            (Self::Tensor(a), Self::Tensor(b)) => a.zip_with(b, f).map(Self::Tensor),
        }
    }
}

impl From<Tensor> for Value {
    fn from(t: Tensor) -> Self {
        Self::Tensor(t)
    }
}

macro_rules! scalar_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Scalar(v.to_scalar())
                }
            }
        )*
    };
}

scalar_value!(f64, f32, i32, i64, u32, u64, usize);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Tensor(t) => write!(f, "{t}"),
        }
    }
}

/// Caller-supplied mapping from variables to values.
///
/// # Example
/// ```
/// use symb_tensor::{Bindings, evaluate, make_variable};
///
/// let x = make_variable("bindings_doc_x");
/// let b = Bindings::new().bind("bindings_doc_x", 2.0);
/// assert_eq!(evaluate(&(x * 3.0), &b).unwrap().as_scalar(), Some(6.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: FxHashMap<Symbol, Value>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding
    #[must_use]
    pub fn bind(mut self, var: impl Into<Symbol>, value: impl Into<Value>) -> Self {
        self.values.insert(var.into(), value.into());
        self
    }

    /// Bind a variable, returning the previous value
    pub fn set(&mut self, var: impl Into<Symbol>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(var.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, var: Symbol) -> Option<&Value> {
        self.values.get(&var)
    }

    #[must_use]
    pub fn contains(&self, var: Symbol) -> bool {
        self.values.contains_key(&var)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Value)> {
        self.values.iter().map(|(&s, v)| (s, v))
    }
}

impl<S: Into<Symbol>, V: Into<Value>> FromIterator<(S, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(s, v)| (s.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symb;

    #[test]
    fn test_zip_broadcast_scales() {
        let s = Value::Scalar(3.0);
        let t = Value::Tensor(Tensor::filled([2, 2], 2.0));
        assert_eq!(
            s.zip_broadcast(&t, |a, b| a * b),
            Some(Value::Tensor(Tensor::filled([2, 2], 6.0)))
        );
    }

    #[test]
    fn test_from_tensorial_collapses_rank_zero() {
        assert_eq!(Value::from_tensorial(&2.5).unwrap(), Value::Scalar(2.5));
        let v = Value::from_tensorial(&[1, 2, 3]).unwrap();
        assert_eq!(v.shape(), Shape::new([3]));
    }

    #[test]
    fn test_bindings_lookup() {
        let x = symb("value_test_x");
        let mut b = Bindings::new().bind(x, 1.0);
        assert_eq!(b.get(x), Some(&Value::Scalar(1.0)));
        assert_eq!(b.set(x, 2.0), Some(Value::Scalar(1.0)));
        assert!(b.contains(x));
        assert!(!b.contains(symb("value_test_unbound")));

        let collected: Bindings = [("value_test_x", 2.0)].into_iter().collect();
        assert_eq!(collected, b);
    }
}
