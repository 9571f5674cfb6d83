//! Scene builders and comparisons shared by the integration tests.

#![allow(dead_code)]

use float_cmp::approx_eq;
use springmass::{NodeHandle, SpringHandle, Vector3, World, WorldConfig};

/// The two-node scene: unit masses at the origin and at `(2, 0, 0)`, joined by
/// a spring with `k = 10` and rest length 1.
pub fn two_nodes(config: WorldConfig<f64>) -> Result<(World<f64>, NodeHandle, NodeHandle, SpringHandle), String> {
    let mut world = World::new(config)?;
    let a = world.add_node(1.0, Vector3::new(0.0, 0.0, 0.0), Vector3::zero())?;
    let b = world.add_node(1.0, Vector3::new(2.0, 0.0, 0.0), Vector3::zero())?;
    let s = world.add_spring(a, b, 10.0, 1.0, 0.0)?;
    Ok((world, a, b, s))
}

/// Node positions of a `side x side x side` grid with the given spacing,
/// slightly perturbed so that springs are not all axis-aligned.
pub fn grid_positions(side: usize, spacing: f64) -> Vec<Vector3<f64>> {
    let mut positions = Vec::with_capacity(side * side * side);
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                let wobble = 0.01 * ((i * 7 + j * 3 + k) % 5) as f64;
                positions.push(Vector3::new(
                    i as f64 * spacing + wobble,
                    j as f64 * spacing - wobble,
                    k as f64 * spacing + 0.5 * wobble,
                ));
            }
        }
    }
    positions
}

/// Index pairs of axis neighbours in a `side x side x side` grid.
pub fn grid_links(side: usize) -> Vec<(usize, usize)> {
    let index = |i: usize, j: usize, k: usize| (i * side + j) * side + k;
    let mut links = Vec::new();
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                if i + 1 < side {
                    links.push((index(i, j, k), index(i + 1, j, k)));
                }
                if j + 1 < side {
                    links.push((index(i, j, k), index(i, j + 1, k)));
                }
                if k + 1 < side {
                    links.push((index(i, j, k), index(i, j, k + 1)));
                }
            }
        }
    }
    links
}

/// Builds a grid world whose springs are inserted in the order given by `links`.
///
/// The rest length of every spring is the grid spacing, so the perturbed grid
/// starts with non-zero forces.
pub fn grid_world(
    config: WorldConfig<f64>,
    side: usize,
    links: &[(usize, usize)],
) -> Result<(World<f64>, Vec<NodeHandle>), String> {
    let spacing = 1.0;
    let mut world = World::new(config)?;
    let nodes = grid_positions(side, spacing)
        .into_iter()
        .enumerate()
        .map(|(i, p)| world.add_node(1.0 + 0.1 * (i % 3) as f64, p, Vector3::zero()))
        .collect::<Result<Vec<_>, _>>()?;
    for &(i, j) in links {
        world.add_spring(nodes[i], nodes[j], 25.0, spacing, 0.0)?;
    }
    Ok((world, nodes))
}

/// Whether two vectors are equal up to an absolute tolerance per component.
pub fn vec_approx_eq(a: Vector3<f64>, b: Vector3<f64>, epsilon: f64) -> bool {
    (0..3).all(|i| approx_eq!(f64, a[i], b[i], epsilon = epsilon))
}
