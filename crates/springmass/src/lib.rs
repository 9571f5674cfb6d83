//! A discrete-element spring-mass simulator.
//!
//! A [`World`] owns point masses ([`Node`]s) connected by linear elastic links
//! ([`Spring`]s). Each call to [`World::step`] runs a four-phase pipeline:
//!
//! 1. clear the accumulated force of every `Node`,
//! 2. add the uniform acceleration (e.g. gravity) scaled by mass,
//! 3. add the force of every `Spring` to one endpoint and its exact negation to the other,
//! 4. integrate every unpinned `Node` with the configured [`Integrator`].
//!
//! `Node`s and `Spring`s are referred to by [`NodeHandle`]s and [`SpringHandle`]s, which stay valid across unrelated
//! insertions and removals and are rejected by any other `World`.
//!
//! ## Example
//!
//! ```rust
//! use springmass::{Vector3, World};
//!
//! let mut world = World::<f64>::default();
//! let a = world.add_node(1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::zero()).unwrap();
//! let b = world.add_node(1.0, Vector3::new(2.0, 0.0, 0.0), Vector3::zero()).unwrap();
//! world.add_spring(a, b, 10.0, 1.0, 0.0).unwrap();
//!
//! world.step(0.1).unwrap();
//!
//! assert_eq!(world.force(a).unwrap(), Vector3::new(10.0, 0.0, 0.0));
//! assert_eq!(world.force(b).unwrap(), Vector3::new(-10.0, 0.0, 0.0));
//! assert_eq!(world.velocity(a).unwrap(), Vector3::new(1.0, 0.0, 0.0));
//! ```
//!
//! ## Degenerate springs
//!
//! A `Spring` whose endpoints coincide has no direction. It contributes no force for that step, and is reported in the
//! [`StepReport`], counted by [`World::degenerate_events`], and logged at the `warn` level.

mod config;
mod error;
mod handle;
mod node;
mod spring;
mod utils;
mod vector;
mod world;

pub use config::{Accumulation, Integrator, WorldConfig};
pub use error::{SimError, Topology};
pub use handle::{NodeHandle, SpringHandle};
pub use node::Node;
pub use spring::{Spring, SpringForce};
pub use utils::Float;
pub use vector::Vector3;
pub use world::{StepReport, World};

/// The current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
