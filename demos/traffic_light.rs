//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic machine composed from fragments.
//!
//! Key concepts:
//! - Cyclic transitions driven by a single `tick` event
//! - Enter hooks threading a value through each transition
//! - A wildcard emergency route layered on as its own fragment
//!
//! Run with: RUST_LOG=mosaic=debug cargo run --example traffic_light

use mosaic::builder::{DefinitionBuilder, MachineBuilder};
use mosaic::core::Hook;
use tracing_subscriber::EnvFilter;

/// Seconds elapsed on the controller clock.
type Clock = u32;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let cycle = DefinitionBuilder::<Clock>::new()
        .state("red", Hook::new(|t: Clock| t + 30), Hook::noop())
        .state("green", Hook::new(|t: Clock| t + 25), Hook::noop())
        .state("yellow", Hook::new(|t: Clock| t + 5), Hook::noop())
        .on("tick", &[("red", "green"), ("green", "yellow"), ("yellow", "red")])
        .build_shared()
        .unwrap();

    let with_emergency = DefinitionBuilder::<Clock>::new()
        .fragment(cycle.clone())
        .passthrough("flashing")
        .on("emergency", &[("*", "flashing")])
        .on("clear", &[("flashing", "red")])
        .build_shared()
        .unwrap();

    let mut light = MachineBuilder::new(cycle).initial("red").build().unwrap();
    println!("Initial state: {}\n", light.current());

    let mut clock = 0;
    for _ in 0..6 {
        let from = light.current().clone();
        clock = light.dispatch("tick", clock).unwrap();
        println!("  {:<6} -> {:<6} (t = {}s)", from, light.current(), clock);
    }

    println!("\nPath: {:?}", light.history().path());

    println!("\nExtended with an emergency fragment:");
    let mut light = MachineBuilder::new(with_emergency)
        .initial("green")
        .build()
        .unwrap();
    let outcome = light.drive(["tick", "emergency", "tick", "clear"], 0);
    println!(
        "  taken = {}, skipped = {}, final = {}, t = {}s",
        outcome.taken,
        outcome.skipped,
        light.current(),
        outcome.output
    );

    println!("\n=== Example Complete ===");
}
