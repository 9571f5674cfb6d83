//! Simulation-wide configuration of a `World`.

use serde::{Deserialize, Serialize};

use crate::{utils, Float, Node, SimError, Vector3};

/// The numerical scheme used to move `Node`s from their accumulated force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Update the velocity from the force, then the position from the new
    /// velocity.
    #[default]
    SemiImplicitEuler,
    /// Update the position from the old velocity, then the velocity from the
    /// force.
    ExplicitEuler,
}

impl Integrator {
    /// Moves a `Node` forward by `dt` under its accumulated force.
    ///
    /// The drag force `-drag * v` is added to the accumulated force before the
    /// update, without being stored on the `Node`. Pinned `Node`s do not move.
    pub fn integrate<F: Float>(self, node: &mut Node<F>, drag: F, dt: F) {
        if node.is_pinned() {
            return;
        }

        let v = node.velocity();
        let a = (node.force() - v * drag) / node.mass();
        match self {
            Self::SemiImplicitEuler => {
                let v = v + a * dt;
                node.set_velocity(v);
                node.set_position(node.position() + v * dt);
            }
            Self::ExplicitEuler => {
                node.set_position(node.position() + v * dt);
                node.set_velocity(v + a * dt);
            }
        }
    }
}

/// How the `World` accumulates `Spring` forces onto `Node`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulation {
    /// Visit `Spring`s one at a time, adding each force to its endpoints.
    #[default]
    Sequential,
    /// Compute every `Spring` force in parallel from a read-only view of the
    /// `Node`s, then add them to the endpoints in a single pass.
    Parallel,
}

/// The configuration of a `World`.
///
/// Every field has a default, so a partial configuration can be deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig<F: Float> {
    /// Uniform acceleration applied to every `Node`, e.g. gravity.
    pub gravity: Vector3<F>,
    /// The integration scheme.
    pub integrator: Integrator,
    /// The accumulation strategy for `Spring` forces.
    pub accumulation: Accumulation,
    /// Linear drag coefficient, resisting the velocity of every `Node`.
    pub drag: F,
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self {
            gravity: Vector3::zero(),
            integrator: Integrator::default(),
            accumulation: Accumulation::default(),
            drag: F::zero(),
        }
    }
}

impl<F: Float> WorldConfig<F> {
    /// Set the uniform acceleration.
    pub fn with_gravity(mut self, gravity: Vector3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the integration scheme.
    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Set the accumulation strategy.
    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    /// Set the drag coefficient.
    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    /// Checks that the configuration can drive a `World`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `gravity` has a non-finite component.
    /// - `InvalidParameter` if `drag` is negative or not finite.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::invalid_parameter(
                "gravity",
                self.gravity,
                "must have finite components",
            ));
        }
        if !utils::is_non_negative_finite(self.drag) {
            return Err(SimError::invalid_parameter("drag", self.drag, "must be finite and >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_and_validation() {
        let config = WorldConfig::<f64>::default()
            .with_gravity(Vector3::new(0.0, -9.81, 0.0))
            .with_integrator(Integrator::ExplicitEuler)
            .with_accumulation(Accumulation::Parallel)
            .with_drag(0.5);
        assert!(config.validate().is_ok());
        assert_eq!(config.integrator, Integrator::ExplicitEuler);

        assert!(config.with_drag(-1.0).validate().is_err());
        assert!(config.with_gravity(Vector3::fill(f64::NAN)).validate().is_err());
    }

    #[test]
    fn integrators_differ() -> Result<(), SimError> {
        let mut semi = Node::new(1.0_f64, Vector3::zero(), Vector3::zero())?;
        semi.add_force(Vector3::new(10.0, 0.0, 0.0));
        let mut explicit = semi.clone();

        Integrator::SemiImplicitEuler.integrate(&mut semi, 0.0, 0.1);
        Integrator::ExplicitEuler.integrate(&mut explicit, 0.0, 0.1);

        assert_eq!(semi.velocity(), explicit.velocity());
        assert_eq!(explicit.position(), Vector3::zero());
        assert!(semi.position().x() > 0.0);
        Ok(())
    }
}
