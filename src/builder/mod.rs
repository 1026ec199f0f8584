//! Builder API for ergonomic definition and machine construction.
//!
//! This module provides fluent builders and the `compose!` macro for
//! assembling definitions and machines with minimal boilerplate.

pub mod definition;
pub mod error;
pub mod machine;
pub mod macros;

pub use definition::DefinitionBuilder;
pub use error::BuildError;
pub use machine::MachineBuilder;
