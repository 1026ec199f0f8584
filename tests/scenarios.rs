//! End-to-end scenarios: compose fragments, run machines, inspect results.

use mosaic::builder::{DefinitionBuilder, MachineBuilder};
use mosaic::compose::{compose, Composer, ComposerConfig, CompositionError};
use mosaic::core::{on, passthrough, state, transition, trigger, Fragment, Hook, TriggerFragment};
use mosaic::{run_stateless, DispatchError, Machine};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn workflow() -> Vec<Fragment<i32>> {
    let mut fragments = vec![
        state("idle", Hook::noop(), Hook::new(|i: i32| i + 3)),
        state("running", Hook::new(|i: i32| i * 2), Hook::noop()),
        passthrough("paused"),
    ];
    fragments.extend(on("start", &[("idle", "running")]));
    fragments.extend(on("pause", &[("running", "paused")]));
    fragments.extend(on("resume", &[("paused", "running")]));
    fragments
}

#[test]
fn workflow_threads_value_through_hooks() {
    init_tracing();
    let definition = Arc::new(compose(workflow()).unwrap());
    let mut machine = Machine::new(definition, "idle").unwrap();

    // idle exit (+3) then running enter (*2)
    assert_eq!(machine.dispatch("start", 0), Ok(6));
    assert_eq!(machine.dispatch("pause", 6), Ok(6));
    assert_eq!(machine.dispatch("resume", 6), Ok(12));
    assert!(machine.is_in("running"));

    let path: Vec<&str> = machine.history().path().into_iter().map(|s| s.as_str()).collect();
    assert_eq!(path, vec!["idle", "running", "paused", "running"]);
}

#[test]
fn unmatched_event_leaves_machine_in_place() {
    init_tracing();
    let definition: Arc<_> = Arc::new(
        compose::<&str, _>(vec![
            passthrough("A"),
            passthrough("B"),
            trigger("go"),
            transition("A", "go", "B"),
        ])
        .unwrap(),
    );
    let mut machine = Machine::new(definition, "A").unwrap();

    assert_eq!(machine.dispatch("go", "x"), Ok("x"));
    assert_eq!(
        machine.dispatch("go", "x"),
        Err(DispatchError::NoMatchingTransition {
            state: "B".into(),
            event: "go".into(),
        })
    );
    assert!(machine.is_in("B"));
    assert_eq!(machine.history().len(), 1);
}

#[test]
fn exit_runs_before_enter() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let hook = |label: &'static str| {
        let log = Arc::clone(&log);
        Hook::new(move |n: u8| {
            log.lock().unwrap().push(label);
            n
        })
    };

    let definition = Arc::new(
        compose(vec![
            state("a", hook("enter a"), hook("exit a")),
            state("b", hook("enter b"), hook("exit b")),
            trigger("go"),
            transition("a", "go", "b"),
            transition("b", "go", "a"),
        ])
        .unwrap(),
    );
    let mut machine = Machine::new(definition, "a").unwrap();
    assert!(log.lock().unwrap().is_empty());

    machine.dispatch("go", 0).unwrap();
    machine.dispatch("go", 0).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["exit a", "enter b", "exit b", "enter a"]
    );
}

#[test]
fn conflicts_are_reported_together() {
    let fragments = vec![
        state("a", Hook::new(|x: i32| x + 1), Hook::noop()),
        state("a", Hook::new(|x: i32| x + 1), Hook::noop()),
        passthrough("b"),
        trigger("go"),
        transition("a", "go", "b"),
        transition("a", "go", "c"),
    ];

    let violations = Composer::new().violations(fragments.clone());
    assert_eq!(violations.len(), 2);
    assert_eq!(
        violations[0],
        CompositionError::DuplicateState { name: "a".into() }
    );
    assert_eq!(
        violations[1],
        CompositionError::AmbiguousTransition {
            from: "a".into(),
            event: "go".into(),
            existing: "b".into(),
            conflicting: "c".into(),
        }
    );

    assert_eq!(compose(fragments).unwrap_err(), violations[0]);
}

#[test]
fn lone_transition_breaks_integrity() {
    let result = compose::<(), _>(vec![transition("A", "go", "B")]);
    let error = result.unwrap_err();

    assert!(error.is_integrity_violation());
    assert_eq!(
        error,
        CompositionError::MissingStateReference {
            from: "A".into(),
            event: "go".into(),
            missing: "A".into(),
        }
    );

    let all = Composer::new().violations::<(), _>(vec![transition("A", "go", "B")]);
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(CompositionError::is_integrity_violation));
}

#[test]
fn wildcard_route_yields_to_exact_route() {
    let definition = DefinitionBuilder::<i32>::new()
        .passthrough("idle")
        .passthrough("busy")
        .state("halted", Hook::new(|_: i32| -1), Hook::noop())
        .on("stop", &[("*", "halted"), ("busy", "idle")])
        .build_shared()
        .unwrap();

    assert_eq!(run_stateless(&definition, "idle", "stop", 5), Ok(-1));
    assert_eq!(run_stateless(&definition, "busy", "stop", 5), Ok(5));
    assert_eq!(run_stateless(&definition, "halted", "stop", 5), Ok(-1));
}

#[test]
fn wildcard_can_be_disabled() {
    let result = DefinitionBuilder::<i32>::new()
        .config(ComposerConfig::default().allow_wildcard_source(false))
        .passthrough("halted")
        .on("stop", &[("*", "halted")])
        .build();

    assert!(result.is_err());
}

#[test]
fn wildcard_is_not_a_state() {
    let named = compose::<(), _>(vec![passthrough("*")]);
    assert_eq!(
        named.unwrap_err(),
        CompositionError::ReservedStateName { name: "*".into() }
    );

    let targeted = compose::<(), _>(vec![
        passthrough("a"),
        trigger("go"),
        transition("a", "go", "*"),
    ]);
    assert!(matches!(
        targeted,
        Err(CompositionError::MissingStateReference { .. })
    ));
}

#[test]
fn triggers_fire_on_machines() {
    let definition = Arc::new(compose(workflow()).unwrap());
    let start = TriggerFragment::new("start");
    let mut machine = Machine::new(definition, "idle").unwrap();

    assert_eq!(machine.fire(&start, 1), Ok(8));
    assert!(machine.fire(&start, 1).unwrap_err().is_no_match());
}

#[test]
fn definitions_extend_without_changing_the_original() {
    init_tracing();
    let base = Arc::new(compose(workflow()).unwrap());

    let mut extra: Vec<Fragment<i32>> = vec![Fragment::from(Arc::clone(&base)), passthrough("done")];
    extra.extend(on("finish", &[("running", "done")]));
    let extended = Arc::new(compose(extra).unwrap());

    let mut original = Machine::new(Arc::clone(&base), "running").unwrap();
    let mut bigger = Machine::new(Arc::clone(&extended), "running").unwrap();

    assert!(!original.can_dispatch("finish"));
    assert!(original.dispatch("finish", 0).is_err());
    assert_eq!(bigger.dispatch("finish", 4), Ok(4));
    assert!(bigger.is_in("done"));
    assert_eq!(base.states().len(), 3);
    assert_eq!(extended.states().len(), 4);
}

#[test]
fn machines_from_one_definition_are_independent() {
    let definition = Arc::new(compose(workflow()).unwrap());
    let mut first = MachineBuilder::new(Arc::clone(&definition))
        .initial("idle")
        .build()
        .unwrap();
    let second = MachineBuilder::new(Arc::clone(&definition))
        .initial("paused")
        .without_history()
        .build()
        .unwrap();

    first.dispatch("start", 0).unwrap();
    first.dispatch("pause", 0).unwrap();

    assert!(first.is_in("paused"));
    assert!(second.is_in("paused"));
    assert!(second.history().is_empty());
    assert_eq!(first.history().len(), 2);

    first.destroy();
    assert_eq!(Arc::strong_count(&definition), 2);
}

#[test]
fn drive_skips_unroutable_events() {
    let definition = Arc::new(compose(workflow()).unwrap());
    let mut machine = Machine::new(definition, "idle").unwrap();

    let outcome = machine.drive(["pause", "start", "start", "pause", "resume"], 1);

    assert_eq!(outcome.taken, 3);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.output, 16);
    assert_eq!(
        machine.available_events().iter().map(|e| e.as_str()).collect::<Vec<_>>(),
        vec!["pause"]
    );
}

#[test]
fn config_deserializes_with_defaults() {
    let composer: ComposerConfig = serde_json::from_str(r#"{"allow_wildcard_source": false}"#).unwrap();
    assert!(!composer.allow_wildcard_source);
    assert!(composer.require_declared_events);

    let machine: mosaic::MachineConfig = serde_json::from_str("{}").unwrap();
    assert!(machine.record_history);
    assert_eq!(machine.history_limit, Some(mosaic::machine::DEFAULT_HISTORY_LIMIT));
}
