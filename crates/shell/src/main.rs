//! CLI for the springmass simulator.

mod commands;
mod simulate;
pub mod utils;

use std::path::PathBuf;

use clap::Parser;
use rand::prelude::*;
use springmass::{Accumulation, Vector3, WorldConfig};

use commands::Commands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The path to the output directory for `states.csv` and `energies.csv`.
    #[arg(short('o'), long)]
    out_path: PathBuf,

    /// The number of steps to simulate.
    #[arg(short('n'), long, default_value_t = 1000)]
    steps: usize,

    /// The length of each step.
    #[arg(short('t'), long, default_value_t = 1e-3)]
    dt: f64,

    /// Node states are written every this many steps.
    #[arg(short('e'), long, default_value_t = 10)]
    save_every: usize,

    /// The random seed to use.
    #[arg(short('s'), long)]
    seed: Option<u64>,

    /// The name of the log-file to use.
    #[arg(short('l'), long, default_value = "shell.log")]
    log_name: String,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = utils::configure_logger(&args.log_name)?;
    ftlog::info!("Log file: {}", log_path.display());

    let schedule = simulate::Schedule {
        steps: args.steps,
        dt: args.dt,
        save_every: args.save_every,
    };

    let (world, nodes) = match args.command {
        Commands::Scene { inp_path } => commands::scene::Scene::read(&inp_path)?.build()?,
        Commands::Lattice {
            dim,
            spacing,
            stiffness,
            mass,
            damping,
            max_speed,
            gravity,
            drag,
            integrator,
            parallel,
        } => {
            let mut rng = args.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
            let accumulation = if parallel {
                Accumulation::Parallel
            } else {
                Accumulation::Sequential
            };
            let config = WorldConfig::default()
                .with_gravity(Vector3::new(0.0, 0.0, -gravity))
                .with_integrator(integrator.into())
                .with_accumulation(accumulation)
                .with_drag(drag);
            let lattice = commands::lattice::Lattice {
                dim,
                spacing,
                stiffness,
                mass,
                damping,
                max_speed,
            };
            lattice.build(config, &mut rng)?
        }
    };

    simulate::run(world, &nodes, schedule, &args.out_path)
}
