//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{Composite, Identifier};
use crate::machine::{Machine, MachineConfig};
use std::sync::Arc;

/// Builder for creating machines over a shared definition.
pub struct MachineBuilder<V> {
    definition: Arc<Composite<V>>,
    initial: Option<Identifier>,
    config: MachineConfig,
}

impl<V> MachineBuilder<V> {
    pub fn new(definition: Arc<Composite<V>>) -> Self {
        Self {
            definition,
            initial: None,
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<Identifier>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep at most `limit` dispatch records.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    pub fn without_history(mut self) -> Self {
        self.config.record_history = false;
        self
    }

    /// Build the machine.
    /// Returns an error if the initial state is missing or unknown.
    pub fn build(self) -> Result<Machine<V>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(Machine::with_config(self.definition, initial, self.config)?)
    }
}
