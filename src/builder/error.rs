//! Build errors for definition and machine builders.

use crate::compose::CompositionError;
use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building definitions and machines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No fragments added. Add at least one state")]
    NoFragments,

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Machine(#[from] MachineError),
}
