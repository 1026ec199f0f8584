//! The merged, validated machine definition.

use super::fragment::{StateFragment, TransitionFragment};
use super::identifier::Identifier;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A fully merged machine definition.
///
/// Only the composer produces composites, and only after every transition
/// has been checked against the declared states and triggers. A composite
/// is never modified afterwards; recomposing yields a new value. Share one
/// between machines with `Arc<Composite<V>>`.
pub struct Composite<V> {
    states: Vec<StateFragment<V>>,
    state_index: HashMap<Identifier, usize>,
    transitions: Vec<TransitionFragment>,
    triggers: Vec<Identifier>,
    trigger_set: HashSet<Identifier>,
    // from -> event -> target state index
    routes: HashMap<Identifier, HashMap<Identifier, usize>>,
    // event -> target state index, for transitions out of "*"
    wildcard_routes: HashMap<Identifier, usize>,
}

impl<V> Composite<V> {
    /// Assemble a composite from validated parts, resolving routes once.
    ///
    /// Transitions whose endpoints do not resolve are left out of the
    /// route table; the composer never passes such transitions in.
    pub(crate) fn assemble(
        states: Vec<StateFragment<V>>,
        transitions: Vec<TransitionFragment>,
        triggers: Vec<Identifier>,
        allow_wildcard_source: bool,
    ) -> Self {
        let state_index: HashMap<Identifier, usize> = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().clone(), i))
            .collect();

        let mut routes: HashMap<Identifier, HashMap<Identifier, usize>> = HashMap::new();
        let mut wildcard_routes = HashMap::new();
        for t in &transitions {
            let Some(&target) = state_index.get(&t.to) else {
                continue;
            };
            if allow_wildcard_source && t.from.is_wildcard() {
                wildcard_routes.insert(t.event.clone(), target);
            } else if state_index.contains_key(&t.from) {
                routes
                    .entry(t.from.clone())
                    .or_default()
                    .insert(t.event.clone(), target);
            }
        }

        let trigger_set = triggers.iter().cloned().collect();

        Self {
            states,
            state_index,
            transitions,
            triggers,
            trigger_set,
            routes,
            wildcard_routes,
        }
    }

    pub fn states(&self) -> &[StateFragment<V>] {
        &self.states
    }

    pub fn transitions(&self) -> &[TransitionFragment] {
        &self.transitions
    }

    pub fn triggers(&self) -> &[Identifier] {
        &self.triggers
    }

    pub fn state(&self, name: &str) -> Option<&StateFragment<V>> {
        self.state_index.get(name).map(|&i| &self.states[i])
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.state_index.contains_key(name)
    }

    /// Whether `event` was declared by a trigger fragment.
    pub fn declares(&self, event: &str) -> bool {
        self.trigger_set.contains(event)
    }

    /// Target of `event` from state `from`. Exact routes win over `"*"`.
    pub fn target(&self, from: &str, event: &str) -> Option<&Identifier> {
        if !self.has_state(from) {
            return None;
        }
        self.resolve(from, event).map(|i| self.states[i].name())
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.transitions.is_empty() && self.triggers.is_empty()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.state_index.get(name).copied()
    }

    pub(crate) fn state_at(&self, index: usize) -> &StateFragment<V> {
        &self.states[index]
    }

    pub(crate) fn route(&self, from: usize, event: &str) -> Option<usize> {
        self.resolve(self.states[from].name(), event)
    }

    /// Events that lead somewhere from `from`, sorted by name.
    pub(crate) fn events_from(&self, from: usize) -> Vec<&Identifier> {
        let name = self.states[from].name();
        let mut events: BTreeSet<&Identifier> = self.wildcard_routes.keys().collect();
        if let Some(exact) = self.routes.get(name) {
            events.extend(exact.keys());
        }
        events.into_iter().collect()
    }

    fn resolve(&self, from: &str, event: &str) -> Option<usize> {
        self.routes
            .get(from)
            .and_then(|events| events.get(event))
            .or_else(|| self.wildcard_routes.get(event))
            .copied()
    }
}

/// Observable equality: same states (by name and hook identity), same
/// transitions and same triggers, irrespective of declaration order.
impl<V> PartialEq for Composite<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.states.len() != other.states.len()
            || self.transitions.len() != other.transitions.len()
            || self.triggers.len() != other.triggers.len()
        {
            return false;
        }

        let states_match = self
            .states
            .iter()
            .all(|s| other.state(s.name()).is_some_and(|o| s.same_as(o)));
        let transitions: HashSet<&TransitionFragment> = self.transitions.iter().collect();
        let transitions_match = other.transitions.iter().all(|t| transitions.contains(t));
        let triggers_match = other.triggers.iter().all(|t| self.trigger_set.contains(t));

        states_match && transitions_match && triggers_match
    }
}

impl<V> fmt::Debug for Composite<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field(
                "states",
                &self.states.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("transitions", &self.transitions)
            .field("triggers", &self.triggers)
            .finish()
    }
}
