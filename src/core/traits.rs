//! Zero and unit checks for constants
//!
//! Simplification rules fire only when an operand is exactly the zero or unit
//! value. Tiny nonzero constants such as physical constants are kept.

use num_traits::Float;

/// Exactly zero (`-0.0` included)
#[inline]
#[allow(clippy::float_cmp)]
pub(crate) fn is_zero<T: Float>(n: T) -> bool {
    n == T::zero()
}

/// Exactly one
#[inline]
#[allow(clippy::float_cmp)]
pub(crate) fn is_one<T: Float>(n: T) -> bool {
    n == T::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_checks() {
        assert!(is_zero(0.0_f64));
        assert!(is_zero(-0.0_f64));
        assert!(!is_zero(1e-12_f64));
        assert!(!is_zero(f64::MIN_POSITIVE));
        assert!(is_one(1.0_f32));
        assert!(!is_one(1.0 + 1e-12_f64));
        assert!(!is_one(f64::NAN));
    }
}
