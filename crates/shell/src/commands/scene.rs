//! Scenes described in YAML files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use springmass::{NodeHandle, Vector3, World, WorldConfig};

/// A node in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// The mass of the node.
    pub mass: f64,
    /// The initial position of the node.
    pub position: Vector3<f64>,
    /// The initial velocity of the node.
    #[serde(default)]
    pub velocity: Vector3<f64>,
    /// Whether the node is held in place.
    #[serde(default)]
    pub pinned: bool,
}

/// A spring in a scene file, referring to nodes by their index in the node list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringSpec {
    /// The index of the first node.
    pub a: usize,
    /// The index of the second node.
    pub b: usize,
    /// The stiffness of the spring.
    pub stiffness: f64,
    /// The rest length of the spring. Defaults to the initial distance between the nodes.
    #[serde(default)]
    pub rest_length: Option<f64>,
    /// The damping coefficient of the spring.
    #[serde(default)]
    pub damping: f64,
}

/// A scene: a configuration and a topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// The configuration of the world.
    #[serde(default)]
    pub config: WorldConfig<f64>,
    /// The nodes.
    pub nodes: Vec<NodeSpec>,
    /// The springs.
    #[serde(default)]
    pub springs: Vec<SpringSpec>,
}

impl Scene {
    /// Reads a scene from a YAML file.
    ///
    /// # Errors
    ///
    /// - If the file could not be read.
    /// - If the file is not a valid scene.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        ftlog::info!("Reading scene from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| format!("Could not read {}: {e}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Parses a scene from a YAML string.
    ///
    /// # Errors
    ///
    /// - If the string is not a valid scene.
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        serde_yaml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Builds the `World` described by the scene.
    ///
    /// Returns the `World` and the handles of its nodes in the order of the
    /// scene file.
    ///
    /// # Errors
    ///
    /// - If a spring refers to a node index that is out of range.
    /// - If the configuration, a node or a spring is rejected by the `World`.
    pub fn build(&self) -> Result<(World<f64>, Vec<NodeHandle>), String> {
        let mut world = World::new(self.config)?;

        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let h = if n.pinned {
                    world.add_pinned_node(n.mass, n.position)
                } else {
                    world.add_node(n.mass, n.position, n.velocity)
                };
                h.map_err(|e| format!("Node {i}: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (i, s) in self.springs.iter().enumerate() {
            let endpoint = |j: usize| {
                nodes
                    .get(j)
                    .copied()
                    .ok_or_else(|| format!("Spring {i}: node index {j} is out of range for {} nodes", nodes.len()))
            };
            let (a, b) = (endpoint(s.a)?, endpoint(s.b)?);
            let added = match s.rest_length {
                Some(l0) => world.add_spring(a, b, s.stiffness, l0, s.damping),
                None => world.add_relaxed_spring(a, b, s.stiffness, s.damping),
            };
            added.map_err(|e| format!("Spring {i}: {e}"))?;
        }

        ftlog::info!(
            "Built a scene with {} nodes and {} springs",
            world.node_count(),
            world.spring_count()
        );

        Ok((world, nodes))
    }
}
