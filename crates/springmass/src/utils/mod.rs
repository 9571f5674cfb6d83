//! Utilities for the crate.

mod float;

pub use float::Float;

/// Returns whether `value` is finite and strictly positive.
pub(crate) fn is_positive_finite<F: Float>(value: F) -> bool {
    value.is_finite() && value > F::zero()
}

/// Returns whether `value` is finite and non-negative.
pub(crate) fn is_non_negative_finite<F: Float>(value: F) -> bool {
    value.is_finite() && value >= F::zero()
}
