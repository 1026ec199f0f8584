//! Fragments: the atomic pieces a machine definition is composed from.
//!
//! Each fragment describes one part of a state machine and knows nothing
//! about the others. A state may be declared in one module and the
//! transitions that reference it in another; whether the pieces fit
//! together is only checked when they are composed.

use super::composite::Composite;
use super::hook::Hook;
use super::identifier::Identifier;
use std::sync::Arc;

/// A named state with its enter and exit hooks.
pub struct StateFragment<V> {
    name: Identifier,
    on_enter: Hook<V>,
    on_exit: Hook<V>,
}

impl<V> StateFragment<V> {
    pub fn new(name: impl Into<Identifier>, on_enter: Hook<V>, on_exit: Hook<V>) -> Self {
        Self {
            name: name.into(),
            on_enter,
            on_exit,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn on_enter(&self) -> &Hook<V> {
        &self.on_enter
    }

    pub fn on_exit(&self) -> &Hook<V> {
        &self.on_exit
    }

    pub fn enter(&self, input: V) -> V {
        self.on_enter.invoke(input)
    }

    pub fn exit(&self, input: V) -> V {
        self.on_exit.invoke(input)
    }

    /// Same name and the same hooks by identity.
    pub fn same_as(&self, other: &StateFragment<V>) -> bool {
        self.name == other.name
            && self.on_enter.same_as(&other.on_enter)
            && self.on_exit.same_as(&other.on_exit)
    }
}

impl<V> Clone for StateFragment<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            on_enter: self.on_enter.clone(),
            on_exit: self.on_exit.clone(),
        }
    }
}

impl<V> std::fmt::Debug for StateFragment<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateFragment")
            .field("name", &self.name)
            .field("on_enter", &self.on_enter)
            .field("on_exit", &self.on_exit)
            .finish()
    }
}

/// Rule moving from `from` to `to` when `event` arrives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionFragment {
    pub from: Identifier,
    pub event: Identifier,
    pub to: Identifier,
}

impl TransitionFragment {
    pub fn new(
        from: impl Into<Identifier>,
        event: impl Into<Identifier>,
        to: impl Into<Identifier>,
    ) -> Self {
        Self {
            from: from.into(),
            event: event.into(),
            to: to.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Declaration that `event` is a recognized input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriggerFragment {
    pub event: Identifier,
}

impl TriggerFragment {
    pub fn new(event: impl Into<Identifier>) -> Self {
        Self {
            event: event.into(),
        }
    }
}

/// One composable piece of a machine definition.
///
/// Leaf fragments are immutable once built. A `Composite` fragment wraps an
/// already-composed definition so it can be merged into a larger one.
pub enum Fragment<V> {
    State(StateFragment<V>),
    Transition(TransitionFragment),
    Trigger(TriggerFragment),
    Composite(Arc<Composite<V>>),
}

impl<V> Fragment<V> {
    pub fn kind(&self) -> &'static str {
        match self {
            Fragment::State(_) => "state",
            Fragment::Transition(_) => "transition",
            Fragment::Trigger(_) => "trigger",
            Fragment::Composite(_) => "composite",
        }
    }
}

impl<V> Clone for Fragment<V> {
    fn clone(&self) -> Self {
        match self {
            Fragment::State(s) => Fragment::State(s.clone()),
            Fragment::Transition(t) => Fragment::Transition(t.clone()),
            Fragment::Trigger(t) => Fragment::Trigger(t.clone()),
            Fragment::Composite(c) => Fragment::Composite(Arc::clone(c)),
        }
    }
}

impl<V> std::fmt::Debug for Fragment<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fragment::State(s) => f.debug_tuple("State").field(s).finish(),
            Fragment::Transition(t) => f.debug_tuple("Transition").field(t).finish(),
            Fragment::Trigger(t) => f.debug_tuple("Trigger").field(t).finish(),
            Fragment::Composite(c) => f.debug_tuple("Composite").field(c).finish(),
        }
    }
}

impl<V> From<StateFragment<V>> for Fragment<V> {
    fn from(state: StateFragment<V>) -> Self {
        Fragment::State(state)
    }
}

impl<V> From<TransitionFragment> for Fragment<V> {
    fn from(transition: TransitionFragment) -> Self {
        Fragment::Transition(transition)
    }
}

impl<V> From<TriggerFragment> for Fragment<V> {
    fn from(trigger: TriggerFragment) -> Self {
        Fragment::Trigger(trigger)
    }
}

impl<V> From<Composite<V>> for Fragment<V> {
    fn from(composite: Composite<V>) -> Self {
        Fragment::Composite(Arc::new(composite))
    }
}

impl<V> From<Arc<Composite<V>>> for Fragment<V> {
    fn from(composite: Arc<Composite<V>>) -> Self {
        Fragment::Composite(composite)
    }
}

/// Build a state fragment.
///
/// # Example
///
/// ```rust
/// use mosaic::core::{state, Fragment, Hook};
///
/// let running: Fragment<i32> = state("running", Hook::new(|x| x * 2), Hook::noop());
/// assert_eq!(running.kind(), "state");
/// ```
pub fn state<V>(name: impl Into<Identifier>, on_enter: Hook<V>, on_exit: Hook<V>) -> Fragment<V> {
    Fragment::State(StateFragment::new(name, on_enter, on_exit))
}

/// Build a state whose hooks are both no-ops.
pub fn passthrough<V>(name: impl Into<Identifier>) -> Fragment<V> {
    state(name, Hook::noop(), Hook::noop())
}

/// Build a transition fragment. `from == to` is a valid self-loop.
pub fn transition<V>(
    from: impl Into<Identifier>,
    event: impl Into<Identifier>,
    to: impl Into<Identifier>,
) -> Fragment<V> {
    Fragment::Transition(TransitionFragment::new(from, event, to))
}

/// Build a trigger fragment declaring `event`.
pub fn trigger<V>(event: impl Into<Identifier>) -> Fragment<V> {
    Fragment::Trigger(TriggerFragment::new(event))
}

/// Declare `event` once and route it between each `(from, to)` pair.
///
/// # Example
///
/// ```rust
/// use mosaic::core::{on, Fragment};
///
/// let fragments: Vec<Fragment<()>> = on("next", &[("red", "green"), ("green", "red")]);
/// assert_eq!(fragments.len(), 3);
/// ```
pub fn on<V>(event: impl Into<Identifier>, routes: &[(&str, &str)]) -> Vec<Fragment<V>> {
    let event = event.into();
    let mut fragments = Vec::with_capacity(routes.len() + 1);
    fragments.push(trigger(event.clone()));
    for (from, to) in routes {
        fragments.push(transition(*from, event.clone(), *to));
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_fragment_keeps_hooks() {
        let enter = Hook::new(|x: i32| x + 1);
        let fragment = StateFragment::new("a", enter.clone(), Hook::noop());

        assert_eq!(fragment.name(), &Identifier::from("a"));
        assert_eq!(fragment.enter(1), 2);
        assert_eq!(fragment.exit(1), 1);
        assert!(fragment.on_enter().same_as(&enter));
    }

    #[test]
    fn structural_identity_requires_same_hooks() {
        let enter = Hook::new(|x: i32| x);
        let a = StateFragment::new("a", enter.clone(), Hook::noop());
        let b = StateFragment::new("a", enter, Hook::noop());
        let c = StateFragment::new("a", Hook::new(|x: i32| x), Hook::noop());

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        assert!(!a.same_as(&StateFragment::new("b", Hook::noop(), Hook::noop())));
    }

    #[test]
    fn self_loop_is_a_valid_transition() {
        let t = TransitionFragment::new("idle", "tick", "idle");
        assert!(t.is_self_loop());
        assert!(!TransitionFragment::new("idle", "go", "busy").is_self_loop());
    }

    #[test]
    fn constructors_produce_matching_kinds() {
        assert_eq!(passthrough::<()>("a").kind(), "state");
        assert_eq!(transition::<()>("a", "go", "b").kind(), "transition");
        assert_eq!(trigger::<()>("go").kind(), "trigger");
    }

    #[test]
    fn on_declares_trigger_first() {
        let fragments: Vec<Fragment<()>> = on("next", &[("a", "b"), ("b", "a")]);

        match &fragments[0] {
            Fragment::Trigger(t) => assert_eq!(t.event, "next"),
            other => panic!("expected trigger, got {:?}", other),
        }
        match &fragments[2] {
            Fragment::Transition(t) => {
                assert_eq!(t.from, "b");
                assert_eq!(t.to, "a");
            }
            other => panic!("expected transition, got {:?}", other),
        }
    }
}
