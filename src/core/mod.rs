//! Core fragment and definition types.
//!
//! This module holds the pure data of the engine:
//! - `Identifier` names for states and events
//! - `Hook` enter/exit functions
//! - `Fragment` pieces and their constructors
//! - `Composite`, the merged definition
//! - Dispatch history records
//!
//! Nothing in here mutates shared state.

mod composite;
mod fragment;
mod history;
mod hook;
mod identifier;

pub use composite::Composite;
pub use fragment::{
    on, passthrough, state, transition, trigger, Fragment, StateFragment, TransitionFragment,
    TriggerFragment,
};
pub use history::{DispatchHistory, DispatchRecord};
pub use hook::{Hook, HookFn};
pub use identifier::{Identifier, WILDCARD};
