//! Switchyard: a validated finite state machine runtime
//!
//! A machine only changes state through actions that were registered up
//! front with the states they may start from and the states they may lead
//! to. Every transition is checked against that table, recorded in a
//! bounded history and announced to listeners in the order they were
//! registered.
//!
//! # Core Concepts
//!
//! - **State** / **Action**: opaque, hashable values via the `State` and
//!   `Action` traits
//! - **Registrations**: action, legal source states, legal target states and
//!   a handler picking the target
//! - **History**: bounded, oldest-evicted-first record of visited states
//! - **Listeners**: filtered callbacks fired after each successful transition
//! - **Graphs**: DOT rendering of the action table
//!
//! # Example
//!
//! ```rust
//! use switchyard::graph::GraphRenderer;
//! use switchyard::machine::{Machine, TransitionError};
//! use switchyard::{action_enum, state_enum};
//!
//! state_enum! {
//!     enum LoadState { Empty, Loading, Complete, Failed }
//!     final: [Complete]
//! }
//!
//! action_enum! {
//!     enum LoadAction { Load, FinishLoading }
//! }
//!
//! let machine = Machine::new(LoadState::Empty, 3);
//! machine
//!     .register_action(
//!         LoadAction::Load,
//!         [LoadState::Empty, LoadState::Failed],
//!         [LoadState::Loading],
//!         |_| LoadState::Loading,
//!     )
//!     .unwrap();
//! machine
//!     .register_action(
//!         LoadAction::FinishLoading,
//!         [LoadState::Loading],
//!         [LoadState::Complete, LoadState::Failed],
//!         |_| LoadState::Complete,
//!     )
//!     .unwrap();
//!
//! machine.on_any_change(|_, t| println!("{:?} -> {:?}", t.from, t.to));
//!
//! assert_eq!(machine.perform_action(&LoadAction::Load), Some(LoadState::Loading));
//! assert_eq!(machine.perform_action(&LoadAction::FinishLoading), Some(LoadState::Complete));
//! assert!(matches!(
//!     machine.try_perform_action(&LoadAction::Load),
//!     Err(TransitionError::IllegalSource { .. })
//! ));
//!
//! let dot = GraphRenderer::render(&machine);
//! assert!(dot.starts_with("digraph {"));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod graph;
pub mod machine;

// Re-export commonly used types
pub use builder::{ActionBuilder, BuildError, MachineBuilder};
pub use config::MachineConfig;
pub use core::{Action, OrderedSet, State, StateHistory};
pub use graph::GraphRenderer;
pub use machine::{DeferredAction, Machine, Transition, TransitionError};
