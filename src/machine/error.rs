//! Machine lifecycle and dispatch errors.

use crate::core::Identifier;
use thiserror::Error;

/// Errors raised when creating a machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Initial state '{state}' is not defined")]
    UnknownInitialState { state: Identifier },
}

/// Errors raised when dispatching an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The current state has no route for the event. State is unchanged
    /// and no hook ran.
    #[error("No transition from '{state}' on '{event}'")]
    NoMatchingTransition { state: Identifier, event: Identifier },

    #[error(transparent)]
    Lifecycle(#[from] MachineError),
}

impl DispatchError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatchingTransition { .. })
    }
}
