//! The `World` owns the `Node`s and `Spring`s and drives the simulation.

use rayon::prelude::*;
use slotmap::SlotMap;

use crate::{
    handle::{NodeHandle, NodeKey, SpringHandle, SpringKey, WorldId},
    spring::NodeMap,
    Accumulation, Float, Node, SimError, Spring, SpringForce, Topology, Vector3, WorldConfig,
};

/// The signals and energies of a single step of a `World`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport<F: Float> {
    /// The number of steps the `World` has taken, including this one.
    pub step: usize,
    /// The simulated time after the step.
    pub time: F,
    /// The `Spring`s whose endpoints coincided during force accumulation.
    /// Each appears at most once.
    pub degenerate: Vec<SpringHandle>,
    /// The kinetic energy of the `World` after the step.
    pub kinetic_energy: F,
    /// The potential energy of the `World` after the step.
    pub potential_energy: F,
}

impl<F: Float> StepReport<F> {
    /// The total mechanical energy after the step.
    pub fn total_energy(&self) -> F {
        self.kinetic_energy + self.potential_energy
    }
}

/// The `World` of `Node`s and `Spring`s.
///
/// Every `Spring` in the `World` connects two live `Node`s of the same
/// `World`. Removing a `Node` also removes every `Spring` attached to it.
///
/// Every `World` has its own identity, so a handle is only ever accepted by the
/// `World` that issued it. `World` is not `Clone`: a copy would share that
/// identity and accept handles from the original.
#[derive(Debug)]
pub struct World<F: Float> {
    /// The identity stamped into every handle issued by this `World`.
    id: WorldId,
    /// The `Node`s.
    nodes: NodeMap<F>,
    /// The `Spring`s.
    springs: SlotMap<SpringKey, Spring<F>>,
    /// The simulation-wide parameters.
    config: WorldConfig<F>,
    /// The simulated time.
    time: F,
    /// The number of successful steps.
    steps_taken: usize,
    /// The running count of degenerate `Spring` occurrences.
    degenerate_events: usize,
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

impl<F: Float> World<F> {
    /// Create an empty `World`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the `config` does not pass `WorldConfig::validate`.
    pub fn new(config: WorldConfig<F>) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    /// Create an empty `World` from a configuration that is known to be valid.
    fn with_valid_config(config: WorldConfig<F>) -> Self {
        let id = WorldId::next();
        ftlog::debug!("Creating world {id:?} with {config:?}");
        Self {
            id,
            nodes: SlotMap::with_key(),
            springs: SlotMap::with_key(),
            config,
            time: F::zero(),
            steps_taken: 0,
            degenerate_events: 0,
        }
    }

    /// Get the configuration of the `World`.
    pub const fn config(&self) -> &WorldConfig<F> {
        &self.config
    }

    /// Get the simulated time.
    pub const fn time(&self) -> F {
        self.time
    }

    /// Get the number of successful steps.
    #[must_use]
    pub const fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Get the running count of degenerate `Spring` occurrences, i.e. the
    /// number of (spring, step) pairs in which the endpoints coincided.
    #[must_use]
    pub const fn degenerate_events(&self) -> usize {
        self.degenerate_events
    }

    /// Resolves a `NodeHandle` to a key of a live `Node`.
    fn node_key(&self, h: NodeHandle) -> Result<NodeKey, SimError> {
        if h.world != self.id {
            Err(Topology::ForeignNode.into())
        } else if self.nodes.contains_key(h.key) {
            Ok(h.key)
        } else {
            Err(Topology::UnknownNode.into())
        }
    }

    /// Resolves a `SpringHandle` to a key of a live `Spring`.
    fn spring_key(&self, h: SpringHandle) -> Result<SpringKey, SimError> {
        if h.world != self.id {
            Err(Topology::ForeignSpring.into())
        } else if self.springs.contains_key(h.key) {
            Ok(h.key)
        } else {
            Err(Topology::UnknownSpring.into())
        }
    }

    /// Issues a handle for a `Node` key.
    const fn node_handle(&self, key: NodeKey) -> NodeHandle {
        NodeHandle { world: self.id, key }
    }

    /// Issues a handle for a `Spring` key.
    const fn spring_handle(&self, key: SpringKey) -> SpringHandle {
        SpringHandle { world: self.id, key }
    }

    /// Add a `Node` to the `World`. This does not add any `Spring`s.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `mass` is not finite and strictly positive.
    /// - `InvalidParameter` if `position` or `velocity` has a non-finite component.
    pub fn add_node(&mut self, mass: F, position: Vector3<F>, velocity: Vector3<F>) -> Result<NodeHandle, SimError> {
        let node = Node::new(mass, position, velocity)?;
        Ok(self.insert_node(node))
    }

    /// Add a pinned `Node` at rest. It receives forces but is never moved by
    /// the integrator.
    ///
    /// # Errors
    ///
    /// See `add_node`.
    pub fn add_pinned_node(&mut self, mass: F, position: Vector3<F>) -> Result<NodeHandle, SimError> {
        let mut node = Node::new(mass, position, Vector3::zero())?;
        node.set_pinned(true);
        Ok(self.insert_node(node))
    }

    /// Stores a validated `Node`.
    fn insert_node(&mut self, node: Node<F>) -> NodeHandle {
        let key = self.nodes.insert(node);
        self.node_handle(key)
    }

    /// Add a `Spring` between two `Node`s.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if either handle is foreign or refers to a removed `Node`.
    /// - `InvalidTopology(SelfLoop)` if `a == b`.
    /// - `InvalidParameter` if any of the spring parameters is out of range.
    pub fn add_spring(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
        stiffness: F,
        rest_length: F,
        damping: F,
    ) -> Result<SpringHandle, SimError> {
        self.node_key(a)?;
        self.node_key(b)?;
        let spring = Spring::new(a, b, stiffness, rest_length, damping)?;
        let key = self.springs.insert(spring);
        Ok(self.spring_handle(key))
    }

    /// Add a `Spring` between two `Node`s whose rest length is their current
    /// distance, so that it starts relaxed.
    ///
    /// # Errors
    ///
    /// See `add_spring`.
    pub fn add_relaxed_spring(
        &mut self,
        a: NodeHandle,
        b: NodeHandle,
        stiffness: F,
        damping: F,
    ) -> Result<SpringHandle, SimError> {
        let rest_length = self.position(a)?.distance_to(&self.position(b)?);
        self.add_spring(a, b, stiffness, rest_length, damping)
    }

    /// Remove a `Node` from the `World`, along with every `Spring` attached
    /// to it.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if the handle is foreign or refers to a removed `Node`.
    pub fn remove_node(&mut self, h: NodeHandle) -> Result<Node<F>, SimError> {
        let key = self.node_key(h)?;

        let before = self.springs.len();
        self.springs.retain(|_, s| !s.touches(key));
        let removed = before - self.springs.len();
        if removed > 0 {
            ftlog::debug!("Removed {removed} springs attached to node {h:?}");
        }

        self.nodes.remove(key).ok_or_else(|| Topology::UnknownNode.into())
    }

    /// Remove a `Spring` from the `World`.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if the handle is foreign or refers to a removed `Spring`.
    pub fn remove_spring(&mut self, h: SpringHandle) -> Result<Spring<F>, SimError> {
        let key = self.spring_key(h)?;
        self.springs.remove(key).ok_or_else(|| Topology::UnknownSpring.into())
    }

    /// Get a `Node` by its handle.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if the handle is foreign or refers to a removed `Node`.
    pub fn node(&self, h: NodeHandle) -> Result<&Node<F>, SimError> {
        let key = self.node_key(h)?;
        Ok(&self.nodes[key])
    }

    /// Get a `Node` by its handle as mutable, e.g. to move it between steps.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if the handle is foreign or refers to a removed `Node`.
    pub fn node_mut(&mut self, h: NodeHandle) -> Result<&mut Node<F>, SimError> {
        let key = self.node_key(h)?;
        Ok(&mut self.nodes[key])
    }

    /// Get the position of a `Node`.
    ///
    /// # Errors
    ///
    /// See `node`.
    pub fn position(&self, h: NodeHandle) -> Result<Vector3<F>, SimError> {
        self.node(h).map(Node::position)
    }

    /// Get the velocity of a `Node`.
    ///
    /// # Errors
    ///
    /// See `node`.
    pub fn velocity(&self, h: NodeHandle) -> Result<Vector3<F>, SimError> {
        self.node(h).map(Node::velocity)
    }

    /// Get the mass of a `Node`.
    ///
    /// # Errors
    ///
    /// See `node`.
    pub fn mass(&self, h: NodeHandle) -> Result<F, SimError> {
        self.node(h).map(Node::mass)
    }

    /// Get the force accumulated on a `Node` in the latest step.
    ///
    /// # Errors
    ///
    /// See `node`.
    pub fn force(&self, h: NodeHandle) -> Result<Vector3<F>, SimError> {
        self.node(h).map(Node::force)
    }

    /// Get a `Spring` by its handle.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if the handle is foreign or refers to a removed `Spring`.
    pub fn spring(&self, h: SpringHandle) -> Result<&Spring<F>, SimError> {
        let key = self.spring_key(h)?;
        Ok(&self.springs[key])
    }

    /// Get the current length of a `Spring`.
    ///
    /// # Errors
    ///
    /// See `spring`.
    pub fn spring_length(&self, h: SpringHandle) -> Result<F, SimError> {
        self.spring(h).map(|s| s.length(&self.nodes))
    }

    /// Get the force a `Spring` currently exerts on its first endpoint,
    /// without applying it.
    ///
    /// # Errors
    ///
    /// See `spring`.
    pub fn spring_force(&self, h: SpringHandle) -> Result<SpringForce<F>, SimError> {
        self.spring(h).map(|s| s.compute_force(&self.nodes))
    }

    /// Iterate over the `Node`s and their handles.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node<F>)> + '_ {
        self.nodes.iter().map(|(k, n)| (self.node_handle(k), n))
    }

    /// Iterate over the `Spring`s and their handles.
    pub fn springs(&self) -> impl Iterator<Item = (SpringHandle, &Spring<F>)> + '_ {
        self.springs.iter().map(|(k, s)| (self.spring_handle(k), s))
    }

    /// The number of `Node`s in the `World`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of `Spring`s in the `World`.
    #[must_use]
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Whether the handle refers to a live `Node` of this `World`.
    #[must_use]
    pub fn contains_node(&self, h: NodeHandle) -> bool {
        self.node_key(h).is_ok()
    }

    /// Whether the handle refers to a live `Spring` of this `World`.
    #[must_use]
    pub fn contains_spring(&self, h: SpringHandle) -> bool {
        self.spring_key(h).is_ok()
    }

    /// Clear the force on every `Node`, add the uniform acceleration, and add
    /// the force of every `Spring` to its endpoints. The `Node`s are not moved.
    ///
    /// Returns a report with the `Spring`s that were degenerate. The step
    /// counter and the time are not advanced.
    pub fn accumulate_forces(&mut self) -> StepReport<F> {
        let degenerate = self.accumulate();
        self.report(degenerate)
    }

    /// Advance the `World` by one time step of length `dt`.
    ///
    /// The step runs the full pipeline: clear forces, add the uniform
    /// acceleration, accumulate `Spring` forces, and integrate every unpinned
    /// `Node` with the configured scheme.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `dt` is not finite and strictly positive. The
    ///   `World` is left unchanged.
    pub fn step(&mut self, dt: F) -> Result<StepReport<F>, SimError> {
        check_dt(dt)?;
        Ok(self.step_unchecked(dt))
    }

    /// Advance the `World` by `steps` time steps of length `dt`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `dt` is not finite and strictly positive. No
    ///   step is taken.
    pub fn evolve(&mut self, dt: F, steps: usize) -> Result<Vec<StepReport<F>>, SimError> {
        check_dt(dt)?;
        ftlog::info!("Evolving world {:?} for {steps} steps with dt = {dt}", self.id);
        Ok((0..steps).map(|_| self.step_unchecked(dt)).collect())
    }

    /// Runs one step with a validated `dt`.
    fn step_unchecked(&mut self, dt: F) -> StepReport<F> {
        let degenerate = self.accumulate();

        let (integrator, drag) = (self.config.integrator, self.config.drag);
        match self.config.accumulation {
            Accumulation::Sequential => {
                for node in self.nodes.values_mut() {
                    integrator.integrate(node, drag, dt);
                }
            }
            Accumulation::Parallel => {
                self.nodes
                    .values_mut()
                    .collect::<Vec<_>>()
                    .into_par_iter()
                    .for_each(|node| integrator.integrate(node, drag, dt));
            }
        }

        self.time += dt;
        self.steps_taken += 1;

        let report = self.report(degenerate);
        ftlog::debug!(
            "Step {} at t = {}: ke = {}, pe = {}, {} degenerate springs",
            report.step,
            report.time,
            report.kinetic_energy,
            report.potential_energy,
            report.degenerate.len()
        );
        report
    }

    /// Runs the clear, uniform acceleration and `Spring` phases of a step.
    ///
    /// Returns the handles of the degenerate `Spring`s.
    fn accumulate(&mut self) -> Vec<SpringHandle> {
        let gravity = self.config.gravity;
        let has_gravity = gravity != Vector3::zero();
        for node in self.nodes.values_mut() {
            node.clear_force();
            if has_gravity {
                node.add_force(gravity * node.mass());
            }
        }

        let degenerate = match self.config.accumulation {
            Accumulation::Sequential => {
                let mut degenerate = Vec::new();
                for (key, spring) in &self.springs {
                    if spring.compute_and_apply_force(&mut self.nodes).is_degenerate() {
                        degenerate.push(key);
                    }
                }
                degenerate
            }
            Accumulation::Parallel => {
                // Compute every force against the same snapshot of the nodes,
                // then apply them in one pass.
                let nodes = &self.nodes;
                let forces = self
                    .springs
                    .iter()
                    .collect::<Vec<_>>()
                    .into_par_iter()
                    .map(|(key, spring)| {
                        let [a, b] = spring.endpoints();
                        (key, a.key, b.key, spring.compute_force(nodes))
                    })
                    .collect::<Vec<_>>();

                let mut degenerate = Vec::new();
                for (key, a, b, force) in forces {
                    match force {
                        SpringForce::Force(f) => {
                            self.nodes[a].add_force(f);
                            self.nodes[b].add_force(-f);
                        }
                        SpringForce::Degenerate => degenerate.push(key),
                    }
                }
                degenerate
            }
        };

        self.degenerate_events += degenerate.len();
        degenerate
            .into_iter()
            .map(|key| {
                let h = self.spring_handle(key);
                ftlog::warn!("Spring {h:?} is degenerate: its endpoints coincide, so it exerts no force");
                h
            })
            .collect()
    }

    /// Builds a report of the current state.
    fn report(&self, degenerate: Vec<SpringHandle>) -> StepReport<F> {
        StepReport {
            step: self.steps_taken,
            time: self.time,
            degenerate,
            kinetic_energy: self.kinetic_energy(),
            potential_energy: self.potential_energy(),
        }
    }

    /// The total kinetic energy of the `Node`s.
    pub fn kinetic_energy(&self) -> F {
        self.nodes.values().map(Node::kinetic_energy).sum()
    }

    /// The total potential energy stored in the `Spring`s.
    pub fn potential_energy(&self) -> F {
        self.springs.values().map(|s| s.potential_energy(&self.nodes)).sum()
    }

    /// The total mechanical energy of the `World`.
    pub fn total_energy(&self) -> F {
        self.kinetic_energy() + self.potential_energy()
    }

    /// The total linear momentum of the `Node`s.
    pub fn total_momentum(&self) -> Vector3<F> {
        self.nodes.values().map(Node::momentum).sum()
    }

    /// The sum of the forces accumulated on the `Node`s in the latest step.
    pub fn total_force(&self) -> Vector3<F> {
        self.nodes.values().map(Node::force).sum()
    }

    /// The mass-weighted mean position of the `Node`s, or `None` if the
    /// `World` is empty.
    pub fn center_of_mass(&self) -> Option<Vector3<F>> {
        if self.nodes.is_empty() {
            return None;
        }
        let total_mass = self.nodes.values().map(Node::mass).sum::<F>();
        let weighted = self.nodes.values().map(|n| n.position() * n.mass()).sum::<Vector3<F>>();
        Some(weighted / total_mass)
    }
}

/// Checks that a time step moves the simulation forward.
fn check_dt<F: Float>(dt: F) -> Result<(), SimError> {
    if crate::utils::is_positive_finite(dt) {
        Ok(())
    } else {
        Err(SimError::invalid_parameter("dt", dt, "must be finite and > 0"))
    }
}
