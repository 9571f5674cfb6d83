//! The commands under the `springmass` CLI.

pub mod lattice;
pub mod scene;

use clap::{Subcommand, ValueEnum};
use springmass::Integrator;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a scene read from a YAML file.
    Scene {
        /// The path to the YAML scene file.
        #[arg(short('i'), long)]
        inp_path: std::path::PathBuf,
    },
    /// Simulate a cubic lattice of nodes linked to their axis and face-diagonal neighbours.
    Lattice {
        /// The number of links along each edge of the cube.
        #[arg(short('d'), long, default_value_t = 6)]
        dim: usize,

        /// The distance between axis neighbours, which is also the rest length of every axis link.
        #[arg(long, default_value_t = 3.0)]
        spacing: f64,

        /// The stiffness of every link.
        #[arg(short('k'), long, default_value_t = 10.0)]
        stiffness: f64,

        /// The mass of every node.
        #[arg(short('m'), long, default_value_t = 1.0)]
        mass: f64,

        /// The damping coefficient of every link.
        #[arg(short('c'), long, default_value_t = 0.0)]
        damping: f64,

        /// The largest initial speed of a node along each axis.
        #[arg(long, default_value_t = 1.0)]
        max_speed: f64,

        /// Downward acceleration along the z axis, e.g. 9.8 for gravity.
        #[arg(short('g'), long, default_value_t = 0.0)]
        gravity: f64,

        /// Linear drag on every node.
        #[arg(long, default_value_t = 0.0)]
        drag: f64,

        /// The integration scheme.
        #[arg(long, default_value_t = Scheme::SemiImplicitEuler)]
        integrator: Scheme,

        /// Accumulate spring forces in parallel.
        #[arg(long)]
        parallel: bool,
    },
}

/// The integration schemes selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Scheme {
    /// Velocity first, then position from the new velocity.
    SemiImplicitEuler,
    /// Position from the old velocity, then velocity.
    ExplicitEuler,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SemiImplicitEuler => write!(f, "semi-implicit-euler"),
            Self::ExplicitEuler => write!(f, "explicit-euler"),
        }
    }
}

impl From<Scheme> for Integrator {
    fn from(s: Scheme) -> Self {
        match s {
            Scheme::SemiImplicitEuler => Self::SemiImplicitEuler,
            Scheme::ExplicitEuler => Self::ExplicitEuler,
        }
    }
}
