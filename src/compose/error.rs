//! Composition errors.

use crate::core::Identifier;
use thiserror::Error;

/// Errors that can occur when merging fragments into a composite.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("State '{name}' declared twice with different hooks")]
    DuplicateState { name: Identifier },

    #[error(
        "Transition ({from}, {event}) already targets '{existing}', cannot also target '{conflicting}'"
    )]
    AmbiguousTransition {
        from: Identifier,
        event: Identifier,
        existing: Identifier,
        conflicting: Identifier,
    },

    #[error("Transition ({from}, {event}) references unknown state '{missing}'")]
    MissingStateReference {
        from: Identifier,
        event: Identifier,
        missing: Identifier,
    },

    #[error("Transition ({from}, {event}) uses event '{event}' that no trigger declares")]
    UndeclaredEvent { from: Identifier, event: Identifier },

    #[error("Empty identifier in {fragment} fragment")]
    EmptyIdentifier { fragment: &'static str },

    #[error("'{name}' is reserved and cannot name a state")]
    ReservedStateName { name: Identifier },
}

impl CompositionError {
    /// True for errors raised by the referential integrity pass.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingStateReference { .. } | Self::UndeclaredEvent { .. }
        )
    }
}
