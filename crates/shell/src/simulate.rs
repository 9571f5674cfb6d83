//! Drives a `World` and records its states and energies.

use std::path::Path;

use serde::Serialize;
use springmass::{NodeHandle, World};

/// One row of `states.csv`.
#[derive(Debug, Serialize)]
struct StateRecord {
    step: usize,
    time: f64,
    node: usize,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
}

/// One row of `energies.csv`.
#[derive(Debug, Serialize)]
struct EnergyRecord {
    step: usize,
    time: f64,
    kinetic: f64,
    potential: f64,
    total: f64,
    degenerate: usize,
}

/// How long to run a `World` and how often to record it.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    /// The number of steps to take.
    pub steps: usize,
    /// The length of each step.
    pub dt: f64,
    /// Node states are written every `save_every` steps.
    pub save_every: usize,
}

/// Steps the `World` and writes `states.csv` and `energies.csv` into `out_dir`.
///
/// The initial state is recorded as step 0.
///
/// # Errors
///
/// - If `save_every` is zero.
/// - If `dt` is rejected by the `World`.
/// - If an output file could not be created or written.
pub fn run<P: AsRef<Path>>(
    mut world: World<f64>,
    nodes: &[NodeHandle],
    schedule: Schedule,
    out_dir: P,
) -> Result<(), String> {
    if schedule.save_every == 0 {
        return Err("`save_every` must be at least 1".to_string());
    }

    let out_dir = out_dir.as_ref();
    crate::utils::ensure_dir(out_dir)?;
    let mut states = csv::Writer::from_path(out_dir.join("states.csv")).map_err(|e| e.to_string())?;
    let mut energies = csv::Writer::from_path(out_dir.join("energies.csv")).map_err(|e| e.to_string())?;

    ftlog::info!(
        "Running {} steps with dt = {}, saving every {} steps to {}",
        schedule.steps,
        schedule.dt,
        schedule.save_every,
        out_dir.display()
    );

    write_states(&mut states, &world, nodes)?;
    let (kinetic, potential) = (world.kinetic_energy(), world.potential_energy());
    energies
        .serialize(EnergyRecord {
            step: 0,
            time: world.time(),
            kinetic,
            potential,
            total: kinetic + potential,
            degenerate: 0,
        })
        .map_err(|e| e.to_string())?;

    for _ in 0..schedule.steps {
        let report = world.step(schedule.dt)?;
        energies
            .serialize(EnergyRecord {
                step: report.step,
                time: report.time,
                kinetic: report.kinetic_energy,
                potential: report.potential_energy,
                total: report.total_energy(),
                degenerate: report.degenerate.len(),
            })
            .map_err(|e| e.to_string())?;

        if report.step % schedule.save_every == 0 {
            write_states(&mut states, &world, nodes)?;
        }
    }

    states.flush().map_err(|e| e.to_string())?;
    energies.flush().map_err(|e| e.to_string())?;

    ftlog::info!(
        "Finished at t = {} with total energy {} and {} degenerate spring events",
        world.time(),
        world.total_energy(),
        world.degenerate_events()
    );

    Ok(())
}

/// Writes the current state of every node.
fn write_states<W: std::io::Write>(writer: &mut csv::Writer<W>, world: &World<f64>, nodes: &[NodeHandle]) -> Result<(), String> {
    for (i, &h) in nodes.iter().enumerate() {
        let node = world.node(h)?;
        let (p, v) = (node.position(), node.velocity());
        writer
            .serialize(StateRecord {
                step: world.steps_taken(),
                time: world.time(),
                node: i,
                x: p.x(),
                y: p.y(),
                z: p.z(),
                vx: v.x(),
                vy: v.y(),
                vz: v.z(),
            })
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}
