//! Mosaic: finite-state machines composed from fragments
//!
//! Instead of declaring a transition table up front, a machine is assembled
//! from small independent fragments: a state with its enter and exit hooks,
//! a single transition rule, or a trigger declaring an event name. The
//! composer merges fragments into one validated definition, which can then
//! drive any number of machines or be run once against a single event.
//!
//! # Core Concepts
//!
//! - **Fragment**: `State`, `Transition`, `Trigger`, or an already composed `Composite`
//! - **Composer**: deterministic merge with conflict and integrity checks
//! - **Machine**: a current state over a shared definition, advanced by events
//! - **Hooks**: pure functions run exit-then-enter on each transition
//!
//! # Example
//!
//! ```rust
//! use mosaic::compose::compose;
//! use mosaic::core::{on, passthrough, state, Hook};
//! use mosaic::machine::Machine;
//! use std::sync::Arc;
//!
//! let mut fragments = vec![
//!     state("idle", Hook::noop(), Hook::new(|i: i32| i + 3)),
//!     state("running", Hook::new(|i: i32| i * 2), Hook::noop()),
//!     passthrough("paused"),
//! ];
//! fragments.extend(on("start", &[("idle", "running")]));
//! fragments.extend(on("pause", &[("running", "paused")]));
//! fragments.extend(on("resume", &[("paused", "running")]));
//!
//! let definition = Arc::new(compose(fragments).unwrap());
//! let mut machine = Machine::new(definition, "idle").unwrap();
//!
//! assert_eq!(machine.dispatch("start", 0).unwrap(), 6);
//! assert_eq!(machine.dispatch("pause", 6).unwrap(), 6);
//! assert_eq!(machine.dispatch("resume", 6).unwrap(), 12);
//! assert_eq!(machine.current(), "running");
//! ```

pub mod builder;
pub mod compose;
pub mod core;
pub mod ffi;
pub mod machine;

// Re-export commonly used types
pub use crate::compose::{Composer, ComposerConfig, CompositionError};
pub use crate::core::{Composite, Fragment, Hook, Identifier};
pub use crate::machine::{run_stateless, DispatchError, Machine, MachineConfig, MachineError};
