//! Running composed definitions.
//!
//! A [`Machine`] binds a shared [`Composite`](crate::core::Composite) to a
//! current state and advances one transition per dispatched event, running
//! the old state's exit hook and then the new state's enter hook.
//! [`run_stateless`] does the same for a single event without keeping a
//! machine around.
//!
//! Hooks run synchronously to completion; there is no cancellation and no
//! timeout at this layer.

mod config;
mod error;
mod instance;
mod run;

pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use error::{DispatchError, MachineError};
pub use instance::{DriveOutcome, Machine};
pub use run::run_stateless;
