//! A trait for the scalar types used by the simulator.

use core::fmt::{Debug, Display};

/// A trait for types that can be used as the scalar of positions, velocities, forces and masses.
///
/// We provide a blanket implementation for all types that satisfy the trait bounds. This includes `f32` and `f64`.
#[must_use]
pub trait Float:
    num_traits::Float
    + num_traits::NumAssign
    + Default
    + Display
    + Debug
    + Send
    + Sync
    + core::iter::Sum
    + 'static
{
    /// Returns half of the value.
    #[must_use]
    fn half(self) -> Self {
        self / (Self::one() + Self::one())
    }
}

/// Blanket implementation of `Float` for all types that satisfy the trait bounds.
impl<T> Float for T where
    T: num_traits::Float
        + num_traits::NumAssign
        + Default
        + Display
        + Debug
        + Send
        + Sync
        + core::iter::Sum
        + 'static
{
}
