//! Tests for the force law of the `Spring` struct.

use float_cmp::approx_eq;
use springmass::{Accumulation, SimError, SpringForce, Topology, Vector3, World, WorldConfig};
use test_case::test_case;

mod common;

#[test]
fn concrete_scenario_forces() -> Result<(), String> {
    let (mut world, a, b, s) = common::two_nodes(Default::default())?;

    let force = world.spring_force(s)?;
    assert_eq!(force, SpringForce::Force(Vector3::new(10.0, 0.0, 0.0)), "Force mismatch: {force:?}");

    let report = world.accumulate_forces();
    assert!(report.degenerate.is_empty(), "Unexpected degenerate springs: {report:?}");
    assert_eq!(world.force(a)?, Vector3::new(10.0, 0.0, 0.0));
    assert_eq!(world.force(b)?, Vector3::new(-10.0, 0.0, 0.0));

    Ok(())
}

#[test_case(Vector3::new(0.3, -1.2, 2.0), Vector3::new(1.7, 0.4, -0.5); "oblique")]
#[test_case(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.5); "compressed")]
#[test_case(Vector3::new(-3.0, 4.0, 0.0), Vector3::new(3.0, -4.0, 0.0); "stretched")]
fn symmetry(pa: Vector3<f64>, pb: Vector3<f64>) -> Result<(), String> {
    let mut world = World::<f64>::default();
    let a = world.add_node(1.0, pa, Vector3::new(0.1, 0.2, 0.3))?;
    let b = world.add_node(2.5, pb, Vector3::new(-0.4, 0.0, 0.9))?;
    let s = world.add_spring(a, b, 7.5, 1.0, 0.3)?;

    let expected = world.spring_force(s)?;
    world.accumulate_forces();

    let (fa, fb) = (world.force(a)?, world.force(b)?);
    assert_eq!(fa, -fb, "Contributions are not exact negations: {fa:?} vs {fb:?}");
    assert_eq!(fa, expected.on_a());
    assert_eq!(fb, expected.on_b());

    Ok(())
}

#[test]
fn direction_follows_extension() -> Result<(), String> {
    let mut world = World::<f64>::default();
    let a = world.add_node(1.0, Vector3::zero(), Vector3::zero())?;
    let b = world.add_node(1.0, Vector3::new(0.0, 0.5, 0.0), Vector3::zero())?;

    // Compressed: pushes `a` away from `b`.
    let s = world.add_spring(a, b, 4.0, 1.0, 0.0)?;
    let f = world.spring_force(s)?.on_a();
    assert!(f.y() < 0.0, "Compressed spring should repel: {f:?}");
    assert!(approx_eq!(f64, f.y(), -2.0, epsilon = 1e-12), "Force mismatch: {f:?}");
    world.remove_spring(s)?;

    // Stretched: pulls `a` toward `b`.
    let s = world.add_spring(a, b, 4.0, 0.25, 0.0)?;
    let f = world.spring_force(s)?.on_a();
    assert!(approx_eq!(f64, f.y(), 1.0, epsilon = 1e-12), "Force mismatch: {f:?}");

    Ok(())
}

#[test]
fn rest_length_equilibrium() -> Result<(), String> {
    let mut world = World::<f64>::default();
    let a = world.add_node(1.0, Vector3::new(1.0, 1.0, 1.0), Vector3::zero())?;
    let b = world.add_node(1.0, Vector3::new(1.0, 1.0, 4.0), Vector3::zero())?;
    let s = world.add_spring(a, b, 100.0, 3.0, 0.5)?;

    assert_eq!(world.spring_length(s)?, 3.0);
    world.accumulate_forces();
    assert_eq!(world.force(a)?, Vector3::zero());
    assert_eq!(world.force(b)?, Vector3::zero());
    assert_eq!(world.potential_energy(), 0.0);

    Ok(())
}

#[test]
fn damping_resists_relative_motion() -> Result<(), String> {
    let mut world = World::<f64>::default();
    // At rest length, separating along x.
    let a = world.add_node(1.0, Vector3::zero(), Vector3::new(-1.0, 0.0, 0.0))?;
    let b = world.add_node(1.0, Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 5.0))?;
    let s = world.add_spring(a, b, 10.0, 1.0, 0.5)?;

    // Only the component of the relative velocity along the spring counts.
    let f = world.spring_force(s)?.on_a();
    assert_eq!(f, Vector3::new(1.0, 0.0, 0.0), "Damping force mismatch: {f:?}");

    Ok(())
}

#[test_case(Accumulation::Sequential; "sequential")]
#[test_case(Accumulation::Parallel; "parallel")]
fn degenerate_spring(accumulation: Accumulation) -> Result<(), String> {
    let mut world = World::<f64>::new(WorldConfig::default().with_accumulation(accumulation))?;
    let p = Vector3::new(0.5, 0.5, 0.5);
    let a = world.add_node(1.0, p, Vector3::zero())?;
    let b = world.add_node(1.0, p, Vector3::new(1.0, 0.0, 0.0))?;
    let c = world.add_node(1.0, Vector3::new(2.5, 0.5, 0.5), Vector3::zero())?;
    let degenerate = world.add_spring(a, b, 10.0, 1.0, 0.2)?;
    world.add_spring(b, c, 10.0, 1.0, 0.0)?;

    assert!(world.spring_force(degenerate)?.is_degenerate());

    let report = world.accumulate_forces();
    assert_eq!(report.degenerate, vec![degenerate], "Degenerate report mismatch: {report:?}");
    assert_eq!(world.degenerate_events(), 1);
    assert_eq!(world.force(a)?, Vector3::zero(), "Degenerate spring leaked force to `a`");
    // `b` only feels the healthy spring.
    assert_eq!(world.force(b)?, Vector3::new(10.0, 0.0, 0.0));

    let report = world.step(0.01)?;
    assert_eq!(report.degenerate, vec![degenerate], "Degenerate report mismatch: {report:?}");
    assert_eq!(world.degenerate_events(), 2);
    assert!(world.position(a)?.is_finite());
    assert!(world.position(b)?.is_finite());

    // The nodes separate, so the spring recovers on the next step.
    let report = world.step(0.01)?;
    assert!(report.degenerate.is_empty(), "Spring should have recovered: {report:?}");
    assert_eq!(world.degenerate_events(), 2);

    Ok(())
}

#[test_case(-1.0, 10.0, 0.0, "rest_length"; "negative rest length")]
#[test_case(f64::INFINITY, 10.0, 0.0, "rest_length"; "infinite rest length")]
#[test_case(1.0, f64::NAN, 0.0, "stiffness"; "nan stiffness")]
#[test_case(1.0, 10.0, -0.1, "damping"; "negative damping")]
fn invalid_parameters(rest_length: f64, stiffness: f64, damping: f64, param: &str) -> Result<(), String> {
    let mut world = World::<f64>::default();
    let a = world.add_node(1.0, Vector3::zero(), Vector3::zero())?;
    let b = world.add_node(1.0, Vector3::fill(1.0), Vector3::zero())?;

    let result = world.add_spring(a, b, stiffness, rest_length, damping);
    match result {
        Err(SimError::InvalidParameter { name, .. }) => assert_eq!(name, param),
        other => panic!("Expected an invalid `{param}`, got {other:?}"),
    }
    assert_eq!(world.spring_count(), 0);

    Ok(())
}

#[test]
fn self_loop() -> Result<(), String> {
    let mut world = World::<f64>::default();
    let a = world.add_node(1.0, Vector3::zero(), Vector3::zero())?;

    let result = world.add_spring(a, a, 10.0, 1.0, 0.0);
    assert_eq!(result, Err(SimError::InvalidTopology(Topology::SelfLoop)));
    assert!(result.is_err_and(|e| e.is_invalid_topology()));

    Ok(())
}
