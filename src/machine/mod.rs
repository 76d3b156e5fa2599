//! Transition engine.
//!
//! This module provides the stateful half of the crate: a machine that
//! validates every transition against its action table, records bounded
//! history and notifies listeners.
//!
//! # Key Concepts
//!
//! - **Registrations**: an action, its legal source states, its legal target
//!   states and a handler that chooses the target
//! - **Listeners**: callbacks filtered by old and new state, run in
//!   registration order after each successful transition
//! - **Deferred actions**: actions queued for the host to run later, the
//!   only way to request a transition from inside a handler or listener

mod deferred;
mod listener;
#[allow(clippy::module_inception)]
mod machine;
mod transition;

pub use deferred::DeferredAction;
pub use listener::ListenerCallback;
pub use machine::Machine;
pub use transition::{Handler, Registration, Transition, TransitionError};
