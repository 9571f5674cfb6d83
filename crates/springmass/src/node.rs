//! `Node`s are the point masses of the spring-mass system.
//!
//! A `Node` is a passive holder of state. `Spring`s add to its accumulated
//! force, and the `Integrator` moves it.

use crate::{utils, Float, SimError, Vector3};

/// A point mass in the spring-mass system.
///
/// A `Node` is defined by its:
///
/// - `position`: where the `Node` is.
/// - `velocity`: how fast the `Node` is moving.
/// - `mass`: the inertia of the `Node`. Always finite and strictly positive.
///
/// The `Node` also stores the force accumulated on it during the current
/// step. The `World` clears it at the start of every step.
#[derive(Debug, Clone)]
pub struct Node<F: Float> {
    /// The position of the `Node`.
    position: Vector3<F>,
    /// The velocity of the `Node`.
    velocity: Vector3<F>,
    /// The force accumulated on the `Node` during the current step.
    force: Vector3<F>,
    /// The mass of the `Node`.
    mass: F,
    /// Whether the `Node` is held in place by the integrator.
    pinned: bool,
}

impl<F: Float> Node<F> {
    /// Creates a new `Node` with no accumulated force.
    ///
    /// # Arguments
    ///
    /// - `mass`: The mass of the `Node`.
    /// - `position`: The initial position of the `Node`.
    /// - `velocity`: The initial velocity of the `Node`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `mass` is not finite and strictly positive.
    /// - `InvalidParameter` if `position` or `velocity` has a non-finite component.
    pub fn new(mass: F, position: Vector3<F>, velocity: Vector3<F>) -> Result<Self, SimError> {
        check_mass(mass)?;
        check_finite("position", position)?;
        check_finite("velocity", velocity)?;
        Ok(Self {
            position,
            velocity,
            force: Vector3::zero(),
            mass,
            pinned: false,
        })
    }

    /// Returns the position of the `Node`.
    pub const fn position(&self) -> Vector3<F> {
        self.position
    }

    /// Sets the position of the `Node`.
    ///
    /// It is the user's responsibility to ensure that the `position` has no
    /// `NaN` or infinite components.
    pub fn set_position(&mut self, position: Vector3<F>) {
        self.position = position;
    }

    /// Returns the velocity of the `Node`.
    pub const fn velocity(&self) -> Vector3<F> {
        self.velocity
    }

    /// Sets the velocity of the `Node`.
    pub fn set_velocity(&mut self, velocity: Vector3<F>) {
        self.velocity = velocity;
    }

    /// Returns the mass of the `Node`.
    #[must_use]
    pub const fn mass(&self) -> F {
        self.mass
    }

    /// Sets the mass of the `Node`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `mass` is not finite and strictly positive. The
    ///   `Node` is left unchanged.
    pub fn set_mass(&mut self, mass: F) -> Result<(), SimError> {
        check_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    /// Returns the force accumulated on the `Node` so far in this step.
    pub const fn force(&self) -> Vector3<F> {
        self.force
    }

    /// Adds the given contribution to the accumulated force.
    pub fn add_force(&mut self, contribution: Vector3<F>) {
        self.force += contribution;
    }

    /// Resets the accumulated force to the zero vector.
    pub fn clear_force(&mut self) {
        self.force = Vector3::zero();
    }

    /// Whether the integrator holds this `Node` in place.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Pins or unpins the `Node`. Pinning also stops the `Node`.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
        if pinned {
            self.velocity = Vector3::zero();
        }
    }

    /// Returns the kinetic energy of the `Node`.
    #[must_use]
    pub fn kinetic_energy(&self) -> F {
        (self.mass * self.velocity.magnitude_squared()).half()
    }

    /// Returns the linear momentum of the `Node`.
    pub fn momentum(&self) -> Vector3<F> {
        self.velocity * self.mass
    }
}

/// Checks that a mass is usable as a divisor during integration.
fn check_mass<F: Float>(mass: F) -> Result<(), SimError> {
    if utils::is_positive_finite(mass) {
        Ok(())
    } else {
        Err(SimError::invalid_parameter("mass", mass, "must be finite and > 0"))
    }
}

/// Checks that every component of a state vector is finite.
fn check_finite<F: Float>(name: &'static str, v: Vector3<F>) -> Result<(), SimError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid_parameter(name, v, "must have finite components"))
    }
}
