//! Error types for puzzle bookkeeping and coordinate parsing.
//!
//! Geometric exclusions (an inapplicable orientation, an off-grid cell, a cell
//! outside the available region) are never errors: the enumerators simply do
//! not yield them.

use std::fmt;

/// Which kind of container entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Piece,
    Problem,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Piece => f.write_str("piece"),
            EntityKind::Problem => f.write_str("problem"),
        }
    }
}

/// Identity errors raised by [`crate::puzzle::Puzzle`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("cannot {action} a {kind} without an id")]
    MissingId {
        kind: EntityKind,
        action: &'static str,
    },

    #[error("{kind} `{id}` already exists")]
    Duplicate { kind: EntityKind, id: String },

    #[error("{kind} `{id}` not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("problem `{0}` has no goal piece")]
    NoGoal(String),
}

impl PuzzleError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        PuzzleError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Failure to read a coordinate from its text form (`1,0,2`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCoordError {
    #[error("empty coordinate")]
    Empty,

    #[error("invalid component `{component}` in coordinate `{input}`")]
    Component { input: String, component: String },
}
