//! Composition of fragments into machine definitions.
//!
//! Fragments are authored independently and merged here. Conflicts
//! between fragments (a state declared twice with different hooks, one
//! `(state, event)` pair routed to two targets) and broken references (a
//! transition naming an unknown state or an undeclared event) are reported
//! at composition time, never at dispatch time.
//!
//! # Example
//!
//! ```rust
//! use mosaic::compose::{Composer, ComposerConfig};
//! use mosaic::core::{passthrough, transition, Fragment};
//!
//! let fragments: Vec<Fragment<()>> = vec![
//!     passthrough("idle"),
//!     passthrough("busy"),
//!     transition("idle", "go", "busy"),
//! ];
//!
//! let relaxed = Composer::with_config(ComposerConfig::default().require_declared_events(false));
//! assert!(relaxed.compose(fragments).is_ok());
//! ```

mod composer;
mod config;
mod error;
mod integrity;

pub use composer::{compose, Composer};
pub use config::ComposerConfig;
pub use error::CompositionError;
