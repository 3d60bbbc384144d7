use thiserror::Error;

use crate::tree::model::{NodeId, Outcome};

/// Failures raised while building a tree or propagating evidence through it.
///
/// Any error returned from a propagation pass leaves the touched nodes partially
/// updated; the tree must not be queried for beliefs afterwards.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    /// Structural misuse: initializing from a non-root, re-parenting a node, cycles.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("no node with identifier '{0}' in the tree")]
    IdentifierNotFound(char),

    /// Evidence across the tree contradicts itself, so the posterior has no mass.
    #[error("belief of node '{identifier}' cannot be normalized: lambda * pi sums to zero")]
    DegenerateNormalization { identifier: char },

    #[error("pi message for node '{identifier}' divides by a zero lambda message component")]
    UndefinedPiMessage { identifier: char },

    #[error("node '{identifier}' must carry a {expected} probability table")]
    TableMismatch {
        identifier: char,
        expected: &'static str,
    },

    #[error("identifier '{0}' is already used in this tree (identifiers are case-insensitive)")]
    DuplicateIdentifier(char),

    #[error("node id {0} does not belong to this tree")]
    UnknownNode(NodeId),

    #[error("invalid outcome '{0}': expected 0/1, false/true or absent/present")]
    InvalidOutcome(String),

    #[error("tree has not been initialized from its root yet")]
    NotInitialized,

    #[error("node '{identifier}' is already instantiated to {existing}; cannot change it to {requested}")]
    ConflictingEvidence {
        identifier: char,
        existing: Outcome,
        requested: Outcome,
    },

    #[error("invalid probability table for node '{identifier}': {reason}")]
    InvalidTable { identifier: char, reason: String },

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

pub type Result<T> = std::result::Result<T, PropagationError>;
