//! The springs for the spring-mass system.

use slotmap::SlotMap;

use crate::{
    handle::{NodeHandle, NodeKey},
    utils, Float, Node, SimError, Topology, Vector3,
};

/// The store of `Node`s that `Spring`s read and write through their handles.
pub(crate) type NodeMap<F> = SlotMap<NodeKey, Node<F>>;

/// The outcome of computing the force of a `Spring`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpringForce<F: Float> {
    /// The force exerted on endpoint `a`. Endpoint `b` receives its negation.
    Force(Vector3<F>),
    /// The endpoints coincide, so the direction of the force is undefined.
    /// Neither endpoint receives a contribution.
    Degenerate,
}

impl<F: Float> SpringForce<F> {
    /// Whether the endpoints coincided.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }

    /// The force on endpoint `a`, or zero if degenerate.
    pub fn on_a(&self) -> Vector3<F> {
        match self {
            Self::Force(f) => *f,
            Self::Degenerate => Vector3::zero(),
        }
    }

    /// The force on endpoint `b`, or zero if degenerate.
    pub fn on_b(&self) -> Vector3<F> {
        -self.on_a()
    }
}

/// A spring in the spring-mass system.
///
/// The spring is defined by its:
///
/// - endpoints `a` and `b`, two distinct `Node`s of the same `World`,
/// - spring constant `k`, i.e. the stiffness of the `Spring`,
/// - rest length `l0`, i.e. the length at which the `Spring` exerts no force,
/// - damping coefficient `c`, resisting the relative velocity of the endpoints
///   along the `Spring`.
///
/// The force on `a` is `k (l - l0) u + c ((vb - va) . u) u`, where `u` is the
/// unit vector from `a` to `b` and `l` is the current length. A stretched
/// `Spring` pulls its endpoints together and a compressed one pushes them
/// apart.
#[derive(Debug, Clone)]
pub struct Spring<F: Float> {
    /// The first `Node` connected by the `Spring`.
    a: NodeHandle,
    /// The second `Node` connected by the `Spring`.
    b: NodeHandle,
    /// The spring constant of the `Spring`.
    k: F,
    /// The rest length of the `Spring`.
    l0: F,
    /// The damping coefficient of the `Spring`.
    c: F,
}

impl<F: Float> Spring<F> {
    /// Create a new `Spring`.
    ///
    /// This does not check that the endpoints are live `Node`s; the `World`
    /// does that before it stores the `Spring`.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology(SelfLoop)` if `a == b`.
    /// - `InvalidParameter` if `stiffness` is not finite.
    /// - `InvalidParameter` if `rest_length` or `damping` is negative or not finite.
    pub fn new(a: NodeHandle, b: NodeHandle, stiffness: F, rest_length: F, damping: F) -> Result<Self, SimError> {
        if a == b {
            return Err(Topology::SelfLoop.into());
        }
        if !stiffness.is_finite() {
            return Err(SimError::invalid_parameter("stiffness", stiffness, "must be finite"));
        }
        if !utils::is_non_negative_finite(rest_length) {
            return Err(SimError::invalid_parameter(
                "rest_length",
                rest_length,
                "must be finite and >= 0",
            ));
        }
        if !utils::is_non_negative_finite(damping) {
            return Err(SimError::invalid_parameter("damping", damping, "must be finite and >= 0"));
        }

        Ok(Self {
            a,
            b,
            k: stiffness,
            l0: rest_length,
            c: damping,
        })
    }

    /// Get the handles of the two `Node`s connected by the `Spring`.
    pub const fn endpoints(&self) -> [NodeHandle; 2] {
        [self.a, self.b]
    }

    /// Whether the `Spring` is attached to the given `Node`.
    pub(crate) fn touches(&self, key: NodeKey) -> bool {
        self.a.key == key || self.b.key == key
    }

    /// Get the spring constant of the `Spring`.
    pub const fn stiffness(&self) -> F {
        self.k
    }

    /// Get the rest length of the `Spring`.
    pub const fn rest_length(&self) -> F {
        self.l0
    }

    /// Get the damping coefficient of the `Spring`.
    pub const fn damping(&self) -> F {
        self.c
    }

    /// Get the current length of the `Spring`.
    pub(crate) fn length(&self, nodes: &NodeMap<F>) -> F {
        nodes[self.a.key].position().distance_to(&nodes[self.b.key].position())
    }

    /// Get the extension of the `Spring`, i.e. the current length minus the
    /// rest length. Negative when compressed.
    pub(crate) fn extension(&self, nodes: &NodeMap<F>) -> F {
        self.length(nodes) - self.l0
    }

    /// Get the potential energy stored in the `Spring`.
    pub(crate) fn potential_energy(&self, nodes: &NodeMap<F>) -> F {
        (self.k * self.extension(nodes).powi(2)).half()
    }

    /// Compute the force the `Spring` exerts on endpoint `a` without applying it.
    pub(crate) fn compute_force(&self, nodes: &NodeMap<F>) -> SpringForce<F> {
        let (na, nb) = (&nodes[self.a.key], &nodes[self.b.key]);

        let delta = nb.position() - na.position();
        let l = delta.magnitude();
        if l.is_nan() || l <= F::zero() {
            return SpringForce::Degenerate;
        }
        let u = delta / l;

        let mut magnitude = self.k * (l - self.l0);
        if self.c > F::zero() {
            magnitude += self.c * (nb.velocity() - na.velocity()).dot(&u);
        }

        SpringForce::Force(u * magnitude)
    }

    /// Compute the force of the `Spring` and add it to endpoint `a`, and its
    /// negation to endpoint `b`.
    ///
    /// A degenerate `Spring` leaves both endpoints untouched.
    pub(crate) fn compute_and_apply_force(&self, nodes: &mut NodeMap<F>) -> SpringForce<F> {
        let force = self.compute_force(nodes);
        if let SpringForce::Force(f) = force {
            nodes[self.a.key].add_force(f);
            nodes[self.b.key].add_force(-f);
        }
        force
    }
}
