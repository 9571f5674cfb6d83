//! Errors raised by topology construction and by stepping a `World`.

use core::fmt;

/// The ways in which a node or spring reference can be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Both endpoints of a spring are the same node.
    SelfLoop,
    /// The node handle was issued by this `World` but the node has since been removed.
    UnknownNode,
    /// The node handle was issued by a different `World`.
    ForeignNode,
    /// The spring handle was issued by this `World` but the spring has since been removed.
    UnknownSpring,
    /// The spring handle was issued by a different `World`.
    ForeignSpring,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop => write!(f, "a spring cannot connect a node to itself"),
            Self::UnknownNode => write!(f, "node is not present in this world"),
            Self::ForeignNode => write!(f, "node belongs to a different world"),
            Self::UnknownSpring => write!(f, "spring is not present in this world"),
            Self::ForeignSpring => write!(f, "spring belongs to a different world"),
        }
    }
}

/// Errors that can occur while building or stepping a `World`.
///
/// Degenerate spring geometry is deliberately absent: it is recovered inside
/// the force computation and reported through `StepReport` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A construction or step argument is out of its valid range.
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// The offending value, formatted.
        value: String,
        /// The constraint that was violated.
        reason: &'static str,
    },
    /// A spring or a handle refers to nodes or springs that this `World` does not own.
    InvalidTopology(Topology),
}

impl SimError {
    /// Creates an `InvalidParameter` error.
    pub(crate) fn invalid_parameter<V: fmt::Display>(name: &'static str, value: V, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this is an `InvalidParameter` error.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Whether this is an `InvalidTopology` error.
    #[must_use]
    pub const fn is_invalid_topology(&self) -> bool {
        matches!(self, Self::InvalidTopology(_))
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value, reason } => {
                write!(f, "invalid parameter `{name}` = {value}: {reason}")
            }
            Self::InvalidTopology(t) => write!(f, "invalid topology: {t}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<Topology> for SimError {
    fn from(t: Topology) -> Self {
        Self::InvalidTopology(t)
    }
}

impl From<SimError> for String {
    fn from(e: SimError) -> Self {
        e.to_string()
    }
}
