//! Loading State Machine
//!
//! This example demonstrates a content loader that can fail and be retried.
//!
//! Key concepts:
//! - Actions restricted to legal source and target states
//! - Handlers that branch on history
//! - Listeners with state filters
//! - Follow-up actions queued from a listener, with a retry backoff
//! - DOT output of the action table
//!
//! Run with: RUST_LOG=debug cargo run --example loading

use std::thread;
use std::time::Duration;
use switchyard::core::OrderedSet;
use switchyard::graph::GraphRenderer;
use switchyard::machine::Machine;
use switchyard::{action_enum, state_enum};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum LoadState {
        Empty,
        Loading,
        Complete,
        Failed,
    }
    final: [Complete]
}

action_enum! {
    enum LoadAction {
        Load,
        FinishLoading,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Loading State Machine ===\n");

    let machine = Machine::new(LoadState::Empty, 3);
    machine
        .register_action(
            LoadAction::Load,
            [LoadState::Empty, LoadState::Failed],
            [LoadState::Loading],
            |_| LoadState::Loading,
        )
        .expect("load registration is valid");

    // The first attempt fails; once a failure is in history the retry succeeds.
    machine
        .register_action(
            LoadAction::FinishLoading,
            [LoadState::Loading],
            [LoadState::Complete, LoadState::Failed],
            |m| {
                if m.history().contains(&LoadState::Failed) {
                    LoadState::Complete
                } else {
                    LoadState::Failed
                }
            },
        )
        .expect("finish registration is valid");

    machine.on_any_change(|_, t| {
        println!("  {:?}: {:?} -> {:?}", t.action, t.from, t.to);
    });
    machine.on_change(
        None,
        Some(OrderedSet::from([LoadState::Loading])),
        |m, _| m.defer(LoadAction::FinishLoading).detach(),
    );
    machine.on_change(
        None,
        Some(OrderedSet::from([LoadState::Failed])),
        |m, _| {
            m.defer_after(LoadAction::Load, Duration::from_millis(20))
                .detach()
        },
    );

    println!("Initial state: {:?}\n", machine.current_state());
    println!("Transitions:");
    machine.perform_action(&LoadAction::Load);
    while machine.pending_deferred() > 0 {
        machine.run_deferred();
        thread::sleep(Duration::from_millis(5));
    }

    println!("\nFinal state: {:?}", machine.current_state());
    println!("History (last 3): {:?}", machine.history());
    println!(
        "Load from final state: {:?}",
        machine.try_perform_action(&LoadAction::Load)
    );

    println!("\nGraph:\n{}", GraphRenderer::render(&machine));

    println!("=== Example Complete ===");
}
