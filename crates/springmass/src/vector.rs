//! A 3-component vector that can represent the position, velocity, or force
//! of a `Node`.

use serde::{Deserialize, Serialize};

use crate::Float;

/// A 3-component vector that can represent the position, velocity, or force
/// of a `Node`.
///
/// `Vector3` is a plain value: equality is exact componentwise comparison and
/// all arithmetic is componentwise.
#[must_use]
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3<F: Float>([F; 3]);

impl<F: Float> core::fmt::Debug for Vector3<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<F: Float> core::fmt::Display for Vector3<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}

impl<F: Float> Vector3<F> {
    /// Create a new `Vector3` from its components.
    pub const fn new(x: F, y: F, z: F) -> Self {
        Self([x, y, z])
    }

    /// Create a new `Vector3` with all components set to `0.0`.
    pub fn zero() -> Self {
        Self([F::zero(); 3])
    }

    /// Create a new `Vector3` with all components set to `v`.
    pub const fn fill(v: F) -> Self {
        Self([v; 3])
    }

    /// The x component.
    #[must_use]
    pub const fn x(&self) -> F {
        self.0[0]
    }

    /// The y component.
    #[must_use]
    pub const fn y(&self) -> F {
        self.0[1]
    }

    /// The z component.
    #[must_use]
    pub const fn z(&self) -> F {
        self.0[2]
    }

    /// Get the dot product of two `Vector3`s.
    #[must_use]
    pub fn dot(&self, other: &Self) -> F {
        self.0.iter().zip(other.0.iter()).map(|(&a, &b)| a * b).sum()
    }

    /// Get the squared magnitude of the `Vector3`.
    #[must_use]
    pub fn magnitude_squared(&self) -> F {
        self.dot(self)
    }

    /// Get the magnitude of the `Vector3`.
    #[must_use]
    pub fn magnitude(&self) -> F {
        self.magnitude_squared().sqrt()
    }

    /// Get the euclidean distance between two `Vector3`s.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> F {
        (*other - *self).magnitude()
    }

    /// Whether every component is neither `NaN` nor infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl<F: Float> From<[F; 3]> for Vector3<F> {
    fn from(elements: [F; 3]) -> Self {
        Self(elements)
    }
}

impl<F: Float> From<Vector3<F>> for [F; 3] {
    fn from(val: Vector3<F>) -> [F; 3] {
        val.0
    }
}

impl<F: Float> AsRef<[F; 3]> for Vector3<F> {
    fn as_ref(&self) -> &[F; 3] {
        &self.0
    }
}

impl<F: Float> core::ops::Index<usize> for Vector3<F> {
    type Output = F;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<F: Float> core::ops::Add<Self> for Vector3<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self([self.0[0] + other.0[0], self.0[1] + other.0[1], self.0[2] + other.0[2]])
    }
}

impl<F: Float> core::ops::AddAssign<Self> for Vector3<F> {
    fn add_assign(&mut self, other: Self) {
        for (s, o) in self.0.iter_mut().zip(other.0) {
            *s += o;
        }
    }
}

impl<F: Float> core::ops::Sub<Self> for Vector3<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self([self.0[0] - other.0[0], self.0[1] - other.0[1], self.0[2] - other.0[2]])
    }
}

impl<F: Float> core::ops::SubAssign<Self> for Vector3<F> {
    fn sub_assign(&mut self, other: Self) {
        for (s, o) in self.0.iter_mut().zip(other.0) {
            *s -= o;
        }
    }
}

impl<F: Float> core::ops::Neg for Vector3<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self([-self.0[0], -self.0[1], -self.0[2]])
    }
}

impl<F: Float> core::ops::Mul<F> for Vector3<F> {
    type Output = Self;

    fn mul(self, scalar: F) -> Self::Output {
        Self([self.0[0] * scalar, self.0[1] * scalar, self.0[2] * scalar])
    }
}

impl<F: Float> core::ops::MulAssign<F> for Vector3<F> {
    fn mul_assign(&mut self, scalar: F) {
        for s in &mut self.0 {
            *s *= scalar;
        }
    }
}

impl<F: Float> core::ops::Div<F> for Vector3<F> {
    type Output = Self;

    fn div(self, scalar: F) -> Self::Output {
        Self([self.0[0] / scalar, self.0[1] / scalar, self.0[2] / scalar])
    }
}

impl<F: Float> core::ops::DivAssign<F> for Vector3<F> {
    fn div_assign(&mut self, scalar: F) {
        for s in &mut self.0 {
            *s /= scalar;
        }
    }
}

impl<F: Float> core::iter::Sum for Vector3<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

/// Implements `scalar * vector` for the primitive float types, so that scalar
/// multiplication commutes.
macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl core::ops::Mul<Vector3<$t>> for $t {
                type Output = Vector3<$t>;

                fn mul(self, v: Vector3<$t>) -> Self::Output {
                    v * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64);
