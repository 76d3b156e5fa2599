//! Core value types of the state machine.
//!
//! This module contains the pieces that know nothing about execution:
//! - State and action definitions via the `State` and `Action` traits
//! - Insertion-ordered sets used for from/to states and listener filters
//! - Bounded history tracking

mod history;
mod set;
mod state;

pub use history::StateHistory;
pub use set::OrderedSet;
pub use state::{Action, State};
