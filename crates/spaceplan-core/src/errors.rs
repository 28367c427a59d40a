//! Error types for the space-plan pipeline.

use std::fmt;

use thiserror::Error;

/// Result type for the space-plan pipeline; stage functions name their own error.
pub type Result<T, E = SpacePlanError> = std::result::Result<T, E>;

/// Top-level error type for the space-plan pipeline.
#[derive(Debug, Error)]
pub enum SpacePlanError {
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors while reading boundary shapes.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("Invalid boundary format: {reason}")]
    InvalidBoundaryFormat { reason: String },
}

/// Errors while locating and normalizing a space program.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("No valid hierarchy found (top-level keys: {})", .keys.join(", "))]
    NoValidHierarchy { keys: Vec<String> },

    #[error("No JSON content found in generator output")]
    NoJsonFound,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors during layout computation.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Malformed hierarchy at node {node}: {defect}")]
    MalformedHierarchy { node: String, defect: HierarchyDefect },
}

/// Structural defect that makes a hierarchy impossible to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyDefect {
    /// A node is its own ancestor
    Cycle,
    /// A node is reachable through more than one parent
    SharedNode,
    /// Nesting is deeper than the configured limit
    DepthExceeded { limit: u32 },
    /// A child id does not resolve to a node, or the program has no root
    MissingNode,
}

impl fmt::Display for HierarchyDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchyDefect::Cycle => write!(f, "node references one of its ancestors"),
            HierarchyDefect::SharedNode => {
                write!(f, "node is reachable through more than one parent")
            }
            HierarchyDefect::DepthExceeded { limit } => {
                write!(f, "nesting exceeds maximum depth ({limit})")
            }
            HierarchyDefect::MissingNode => write!(f, "referenced node does not exist"),
        }
    }
}

impl LayoutError {
    pub fn malformed(node: impl Into<String>, defect: HierarchyDefect) -> Self {
        LayoutError::MalformedHierarchy {
            node: node.into(),
            defect,
        }
    }

    /// The defect carried by this error.
    pub fn defect(&self) -> HierarchyDefect {
        match self {
            LayoutError::MalformedHierarchy { defect, .. } => *defect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = LayoutError::malformed("wing", HierarchyDefect::DepthExceeded { limit: 64 });
        assert_eq!(
            err.to_string(),
            "Malformed hierarchy at node wing: nesting exceeds maximum depth (64)"
        );

        let err = ProgramError::NoValidHierarchy {
            keys: vec!["rooms".into(), "meta".into()],
        };
        assert_eq!(err.to_string(), "No valid hierarchy found (top-level keys: rooms, meta)");
    }

    #[test]
    fn test_top_level_conversion() {
        let err: SpacePlanError = LayoutError::malformed("root", HierarchyDefect::Cycle).into();
        assert!(matches!(err, SpacePlanError::Layout(_)));
    }
}
