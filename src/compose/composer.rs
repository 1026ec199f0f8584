//! Merging fragments into a composite definition.

use crate::compose::config::ComposerConfig;
use crate::compose::error::CompositionError;
use crate::compose::integrity;
use crate::core::{
    Composite, Fragment, Identifier, StateFragment, TransitionFragment, TriggerFragment,
};
use std::collections::{HashMap, HashSet};

/// Merges an ordered sequence of fragments into one [`Composite`].
///
/// Fragments are applied in order:
/// - a state is inserted by name; redeclaring it with the same hooks is a
///   no-op, with different hooks a `DuplicateState` error
/// - a transition is keyed by `(from, event)`; repeating it with the same
///   target is a no-op, with another target an `AmbiguousTransition` error
/// - a trigger is added to the declared event set
/// - a composite is flattened as if its contents appeared inline
///
/// Referential integrity is checked once everything is merged.
///
/// # Example
///
/// ```rust
/// use mosaic::compose::Composer;
/// use mosaic::core::{passthrough, transition, trigger, Fragment};
///
/// let fragments: Vec<Fragment<()>> = vec![
///     passthrough("idle"),
///     passthrough("busy"),
///     trigger("go"),
///     transition("idle", "go", "busy"),
/// ];
///
/// let definition = Composer::new().compose(fragments).unwrap();
/// assert_eq!(definition.target("idle", "go").map(|t| t.as_str()), Some("busy"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Composer {
    config: ComposerConfig,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose fragments, failing with the first problem found.
    pub fn compose<V, I>(&self, fragments: I) -> Result<Composite<V>, CompositionError>
    where
        I: IntoIterator<Item = Fragment<V>>,
    {
        let (draft, violations) = self.merge(fragments);

        if let Some(first) = violations.first() {
            tracing::debug!(
                error = %first,
                violations = violations.len(),
                "Composition rejected"
            );
            return Err(first.clone());
        }

        tracing::debug!(
            states = draft.states.len(),
            transitions = draft.transitions.len(),
            triggers = draft.triggers.len(),
            "Composed definition"
        );

        Ok(Composite::assemble(
            draft.states,
            draft.transitions,
            draft.triggers,
            self.config.allow_wildcard_source,
        ))
    }

    /// Every problem `compose` would find, in the order it finds them.
    ///
    /// Empty when the fragments compose cleanly.
    pub fn violations<V, I>(&self, fragments: I) -> Vec<CompositionError>
    where
        I: IntoIterator<Item = Fragment<V>>,
    {
        self.merge(fragments).1
    }

    fn merge<V, I>(&self, fragments: I) -> (Draft<V>, Vec<CompositionError>)
    where
        I: IntoIterator<Item = Fragment<V>>,
    {
        let mut draft = Draft::new();
        for fragment in fragments {
            draft.apply(fragment);
        }

        if !self.config.require_declared_events {
            draft.declare_transition_events();
        }

        let check = integrity::check_transitions(
            &draft.transitions,
            |name| draft.state_index.contains_key(name),
            |event| draft.trigger_set.contains(event),
            &self.config,
        );

        let mut violations = std::mem::take(&mut draft.conflicts);
        violations.extend(integrity::violations(check));
        (draft, violations)
    }
}

/// Compose with the default configuration.
///
/// # Example
///
/// ```rust
/// use mosaic::compose::{compose, CompositionError};
/// use mosaic::core::{transition, Fragment};
///
/// let result = compose::<(), _>(vec![transition("a", "go", "b")]);
/// assert!(matches!(result, Err(CompositionError::MissingStateReference { .. })));
/// ```
pub fn compose<V, I>(fragments: I) -> Result<Composite<V>, CompositionError>
where
    I: IntoIterator<Item = Fragment<V>>,
{
    Composer::default().compose(fragments)
}

/// Accumulator for fragments in the order they arrive.
struct Draft<V> {
    states: Vec<StateFragment<V>>,
    state_index: HashMap<Identifier, usize>,
    transitions: Vec<TransitionFragment>,
    transition_index: HashMap<(Identifier, Identifier), usize>,
    triggers: Vec<Identifier>,
    trigger_set: HashSet<Identifier>,
    conflicts: Vec<CompositionError>,
}

impl<V> Draft<V> {
    fn new() -> Self {
        Self {
            states: Vec::new(),
            state_index: HashMap::new(),
            transitions: Vec::new(),
            transition_index: HashMap::new(),
            triggers: Vec::new(),
            trigger_set: HashSet::new(),
            conflicts: Vec::new(),
        }
    }

    fn apply(&mut self, fragment: Fragment<V>) {
        match fragment {
            Fragment::State(state) => self.add_state(state),
            Fragment::Transition(transition) => self.add_transition(transition),
            Fragment::Trigger(trigger) => self.add_trigger(trigger),
            Fragment::Composite(composite) => {
                for state in composite.states() {
                    self.add_state(state.clone());
                }
                for transition in composite.transitions() {
                    self.add_transition(transition.clone());
                }
                for event in composite.triggers() {
                    self.add_trigger(TriggerFragment::new(event));
                }
            }
        }
    }

    fn add_state(&mut self, state: StateFragment<V>) {
        let name = state.name();
        if name.is_empty() {
            self.conflicts
                .push(CompositionError::EmptyIdentifier { fragment: "state" });
            return;
        }
        if name.is_wildcard() {
            self.conflicts.push(CompositionError::ReservedStateName { name: name.clone() });
            return;
        }

        match self.state_index.get(name).copied() {
            Some(existing) if self.states[existing].same_as(&state) => {
                tracing::trace!(state = %name, "Identical state redeclared");
            }
            Some(_) => {
                tracing::debug!(state = %name, "Conflicting state declaration");
                self.conflicts
                    .push(CompositionError::DuplicateState { name: name.clone() });
            }
            None => {
                self.state_index.insert(name.clone(), self.states.len());
                self.states.push(state);
            }
        }
    }

    fn add_transition(&mut self, transition: TransitionFragment) {
        if transition.from.is_empty() || transition.event.is_empty() || transition.to.is_empty() {
            self.conflicts.push(CompositionError::EmptyIdentifier {
                fragment: "transition",
            });
            return;
        }

        let key = (transition.from.clone(), transition.event.clone());
        match self.transition_index.get(&key).copied() {
            Some(existing) => {
                let existing = &self.transitions[existing];
                if existing.to != transition.to {
                    tracing::debug!(
                        from = %transition.from,
                        event = %transition.event,
                        "Conflicting transition target"
                    );
                    self.conflicts.push(CompositionError::AmbiguousTransition {
                        from: transition.from,
                        event: transition.event,
                        existing: existing.to.clone(),
                        conflicting: transition.to,
                    });
                }
            }
            None => {
                self.transition_index.insert(key, self.transitions.len());
                self.transitions.push(transition);
            }
        }
    }

    /// Treat every transition event as declared by a trigger.
    fn declare_transition_events(&mut self) {
        let events: Vec<Identifier> = self.transitions.iter().map(|t| t.event.clone()).collect();
        for event in events {
            self.add_trigger(TriggerFragment::new(event));
        }
    }

    fn add_trigger(&mut self, trigger: TriggerFragment) {
        if trigger.event.is_empty() {
            self.conflicts
                .push(CompositionError::EmptyIdentifier { fragment: "trigger" });
            return;
        }
        if self.trigger_set.insert(trigger.event.clone()) {
            self.triggers.push(trigger.event);
        }
    }
}
