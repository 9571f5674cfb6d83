//! Generation of a cubic lattice of nodes and links.

use rand::prelude::*;
use springmass::{NodeHandle, Vector3, World, WorldConfig};

/// The grid offsets along which each node is linked: the three axes and the
/// six face diagonals, each listed once so that no pair is linked twice.
const LINKS: [[isize; 3]; 9] = [
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
    [0, 1, 1],
    [1, 0, 1],
    [1, -1, 0],
    [0, 1, -1],
    [-1, 0, 1],
];

/// The shape and material of a cubic lattice.
#[derive(Debug, Clone, Copy)]
pub struct Lattice {
    /// The number of links along each edge of the cube.
    pub dim: usize,
    /// The distance between neighbouring nodes.
    pub spacing: f64,
    /// The stiffness of every link.
    pub stiffness: f64,
    /// The mass of every node.
    pub mass: f64,
    /// The damping coefficient of every link.
    pub damping: f64,
    /// The largest initial speed of a node along each axis.
    pub max_speed: f64,
}

impl Lattice {
    /// The number of nodes along each edge of the cube.
    const fn side(&self) -> usize {
        self.dim + 1
    }

    /// The flat index of the node at grid coordinates `(x, y, z)`.
    const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.side() + y) * self.side() + x
    }

    /// The grid coordinates at `offset` from `(x, y, z)`, if they lie inside the cube.
    fn neighbour(&self, [x, y, z]: [usize; 3], offset: [isize; 3]) -> Option<[usize; 3]> {
        let step = |c: usize, d: isize| c.checked_add_signed(d).filter(|&n| n <= self.dim);
        Some([step(x, offset[0])?, step(y, offset[1])?, step(z, offset[2])?])
    }

    /// Whether the grid coordinates are a corner of the cube.
    fn is_corner(&self, x: usize, y: usize, z: usize) -> bool {
        [x, y, z].iter().all(|&c| c == 0 || c == self.dim)
    }

    /// Builds a `World` with `(dim + 1)^3` nodes on a grid, each linked to its
    /// axis neighbours and its face-diagonal neighbours. Every link starts
    /// relaxed, so axis links rest at `spacing` and diagonal links at
    /// `spacing * sqrt(2)`.
    ///
    /// The eight corners are pinned. Every other node starts with a random
    /// velocity whose components are drawn uniformly from
    /// `[-max_speed, max_speed]`.
    ///
    /// Returns the `World` and the handles of its nodes in grid order.
    ///
    /// # Errors
    ///
    /// - If `dim` is zero or `max_speed` is negative.
    /// - If the configuration, the mass or the link parameters are rejected by the `World`.
    pub fn build<R: Rng>(&self, config: WorldConfig<f64>, rng: &mut R) -> Result<(World<f64>, Vec<NodeHandle>), String> {
        if self.dim == 0 {
            return Err("The lattice needs at least one link per edge".to_string());
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(format!("Invalid maximum speed: {}", self.max_speed));
        }

        let side = self.side();
        let mut world = World::new(config)?;
        let mut nodes = Vec::with_capacity(side * side * side);

        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    let position = Vector3::new(x as f64, y as f64, z as f64) * self.spacing;
                    let h = if self.is_corner(x, y, z) {
                        world.add_pinned_node(self.mass, position)?
                    } else {
                        let mut speed = || rng.random_range(-self.max_speed..=self.max_speed);
                        let velocity = Vector3::new(speed(), speed(), speed());
                        world.add_node(self.mass, position, velocity)?
                    };
                    nodes.push(h);
                }
            }
        }

        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    let here = nodes[self.index(x, y, z)];
                    for offset in LINKS {
                        if let Some([i, j, k]) = self.neighbour([x, y, z], offset) {
                            let there = nodes[self.index(i, j, k)];
                            world.add_relaxed_spring(here, there, self.stiffness, self.damping)?;
                        }
                    }
                }
            }
        }

        ftlog::info!(
            "Built a lattice with {} nodes and {} links",
            world.node_count(),
            world.spring_count()
        );

        Ok((world, nodes))
    }
}
