//! Stateful machine instances.

use crate::core::{Composite, DispatchHistory, DispatchRecord, Identifier, TriggerFragment};
use crate::machine::config::MachineConfig;
use crate::machine::error::{DispatchError, MachineError};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Result of driving a machine through a sequence of events.
#[derive(Clone, Debug, PartialEq)]
pub struct DriveOutcome<V> {
    /// Value after the last transition taken
    pub output: V,

    /// Events that moved the machine
    pub taken: usize,

    /// Events with no route from the state the machine was in
    pub skipped: usize,
}

/// A running instance of a composed definition.
///
/// The definition is shared and read-only; the machine exclusively owns its
/// current state. `dispatch` takes `&mut self`, so concurrent dispatches on
/// one machine need external synchronization, while machines sharing a
/// definition can run on different threads freely.
///
/// # Example
///
/// ```rust
/// use mosaic::compose::compose;
/// use mosaic::core::{on, passthrough, state, Hook};
/// use mosaic::machine::Machine;
/// use std::sync::Arc;
///
/// let mut fragments = vec![
///     state("idle", Hook::noop(), Hook::new(|x: i32| x + 3)),
///     state("running", Hook::new(|x: i32| x * 2), Hook::noop()),
/// ];
/// fragments.extend(on("start", &[("idle", "running")]));
///
/// let definition = Arc::new(compose(fragments).unwrap());
/// let mut machine = Machine::new(definition, "idle").unwrap();
///
/// assert_eq!(machine.dispatch("start", 0).unwrap(), 6);
/// assert_eq!(machine.current(), "running");
/// assert!(machine.dispatch("start", 0).is_err());
/// ```
pub struct Machine<V> {
    id: Uuid,
    definition: Arc<Composite<V>>,
    current: usize,
    history: DispatchHistory,
    config: MachineConfig,
}

impl<V> Machine<V> {
    /// Create a machine at `initial` with default settings.
    pub fn new(
        definition: Arc<Composite<V>>,
        initial: impl Into<Identifier>,
    ) -> Result<Self, MachineError> {
        Self::with_config(definition, initial, MachineConfig::default())
    }

    pub fn with_config(
        definition: Arc<Composite<V>>,
        initial: impl Into<Identifier>,
        config: MachineConfig,
    ) -> Result<Self, MachineError> {
        let initial = initial.into();
        let Some(current) = definition.index_of(&initial) else {
            tracing::debug!(state = %initial, "Unknown initial state");
            return Err(MachineError::UnknownInitialState { state: initial });
        };

        let id = Uuid::new_v4();
        tracing::debug!(machine = %id, state = %initial, "Machine created");

        Ok(Self {
            id,
            definition,
            current,
            history: DispatchHistory::with_limit(config.history_limit),
            config,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current(&self) -> &Identifier {
        self.definition.state_at(self.current).name()
    }

    pub fn is_in(&self, state: &str) -> bool {
        self.current() == state
    }

    pub fn definition(&self) -> &Arc<Composite<V>> {
        &self.definition
    }

    pub fn history(&self) -> &DispatchHistory {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Whether `event` would move the machine from its current state.
    pub fn can_dispatch(&self, event: &str) -> bool {
        self.definition.route(self.current, event).is_some()
    }

    /// Events with a route out of the current state, sorted by name.
    pub fn available_events(&self) -> Vec<&Identifier> {
        self.definition.events_from(self.current)
    }

    /// Apply one event.
    ///
    /// Runs the current state's exit hook on `input`, moves to the target,
    /// then runs the target's enter hook on the exit hook's result and
    /// returns that. At most one transition is taken. Without a route the
    /// state is unchanged, no hook runs and `NoMatchingTransition` is
    /// returned.
    pub fn dispatch(&mut self, event: &str, input: V) -> Result<V, DispatchError> {
        match self.definition.route(self.current, event) {
            Some(target) => Ok(self.take(target, event, input)),
            None => {
                tracing::debug!(
                    machine = %self.id,
                    state = %self.current(),
                    event,
                    "No matching transition"
                );
                Err(DispatchError::NoMatchingTransition {
                    state: self.current().clone(),
                    event: event.into(),
                })
            }
        }
    }

    /// Dispatch the event a trigger fragment declares.
    pub fn fire(&mut self, trigger: &TriggerFragment, input: V) -> Result<V, DispatchError> {
        self.dispatch(&trigger.event, input)
    }

    /// Thread `input` through `events` in order.
    ///
    /// Each transition's output feeds the next dispatch. Events with no
    /// route from the state the machine is in at that point are skipped.
    pub fn drive<I, E>(&mut self, events: I, input: V) -> DriveOutcome<V>
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        let mut outcome = DriveOutcome {
            output: input,
            taken: 0,
            skipped: 0,
        };

        for event in events {
            let event = event.as_ref();
            match self.definition.route(self.current, event) {
                Some(target) => {
                    outcome.output = self.take(target, event, outcome.output);
                    outcome.taken += 1;
                }
                None => outcome.skipped += 1,
            }
        }

        outcome
    }

    /// Release the machine and its reference to the definition.
    pub fn destroy(self) {
        tracing::debug!(machine = %self.id, state = %self.current(), "Machine destroyed");
    }

    fn take(&mut self, target: usize, event: &str, input: V) -> V {
        let source = self.definition.state_at(self.current);
        let destination = self.definition.state_at(target);

        tracing::trace!(state = %source.name(), "Running exit hook");
        let mid = source.exit(input);

        self.current = target;

        tracing::trace!(state = %destination.name(), "Running enter hook");
        let output = destination.enter(mid);

        tracing::debug!(
            machine = %self.id,
            from = %source.name(),
            event,
            to = %destination.name(),
            "Transition taken"
        );

        if self.config.record_history {
            self.history.push(DispatchRecord {
                from: source.name().clone(),
                event: event.into(),
                to: destination.name().clone(),
                timestamp: Utc::now(),
            });
        }

        output
    }
}

impl<V> fmt::Debug for Machine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current", self.current())
            .field("history", &self.history.len())
            .finish()
    }
}
