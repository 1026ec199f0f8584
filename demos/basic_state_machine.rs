//! Basic State Machine
//!
//! This example demonstrates composing a machine from independent fragments
//! and running it both statefully and statelessly.
//!
//! Key concepts:
//! - States, transitions, and triggers authored separately
//! - Composition errors surfaced before anything runs
//! - Exit-then-enter hook order on every transition
//!
//! Run with: RUST_LOG=mosaic=trace cargo run --example basic_state_machine

use mosaic::compose;
use mosaic::core::{on, passthrough, state, transition, Hook};
use mosaic::{run_stateless, Machine};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Basic State Machine Example ===\n");

    // Each fragment stands on its own; the composer merges them.
    let idle = state("idle", Hook::noop(), Hook::new(|i: i32| i + 3));
    let running = state("running", Hook::new(|i: i32| i * 2), Hook::noop());
    let paused = passthrough("paused");

    let mut fragments = vec![idle, running, paused];
    fragments.extend(on("start", &[("idle", "running")]));
    fragments.extend(on("pause", &[("running", "paused")]));
    fragments.extend(on("resume", &[("paused", "running")]));

    let definition = Arc::new(mosaic::compose::compose(fragments).unwrap());
    println!("Composed {} states:", definition.states().len());
    for state in definition.states() {
        println!("  - {}", state.name());
    }

    let mut machine = Machine::new(Arc::clone(&definition), "idle").unwrap();
    println!("\nMachine {} starts in {}", machine.id(), machine.current());

    let mut value = 0;
    for event in ["start", "pause", "resume"] {
        value = machine.dispatch(event, value).unwrap();
        println!("  {:<7} -> {:<8} value = {}", event, machine.current(), value);
    }

    match machine.dispatch("start", value) {
        Ok(_) => println!("Unexpected transition"),
        Err(e) => println!("\nRejected as expected: {}", e),
    }
    machine.destroy();

    println!("\nStateless run: idle --start--> running");
    println!("  0 -> {}", run_stateless(&definition, "idle", "start", 0).unwrap());

    println!("\nConflicting fragments are caught at composition:");
    let conflict = compose![
        passthrough::<i32>("a"),
        passthrough("b"),
        passthrough("c"),
        mosaic::core::trigger("go"),
        transition("a", "go", "b"),
        transition("a", "go", "c"),
    ];
    if let Err(e) = conflict {
        println!("  {}", e);
    }

    println!("\n=== Example Complete ===");
}
