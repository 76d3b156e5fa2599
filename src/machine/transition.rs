//! Action registrations, transition records and transition errors.

use crate::core::{Action, OrderedSet, State};
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Handler computing the candidate next state for an action.
///
/// Handlers receive the machine by reference so they can inspect the current
/// state and history, which still describe the machine before the
/// transition.
pub type Handler<S, A> = Rc<dyn Fn(&Machine<S, A>) -> S>;

/// Errors that can occur when performing an action.
///
/// None of these leave the machine changed: current state and history are
/// exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Action '{action}' is not registered")]
    Unregistered { action: String },

    #[error("Action '{action}' is not allowed from state '{state}'")]
    IllegalSource { action: String, state: String },

    #[error("Action '{action}' handler returned undeclared target state '{target}'")]
    UndeclaredTarget { action: String, target: String },

    #[error("Action '{action}' was performed while another transition was running")]
    Reentrant { action: String },
}

/// A registered action: its legal source states, its legal target states
/// and the handler that picks the target.
pub struct Registration<S: State, A: Action> {
    action: A,
    from: OrderedSet<S>,
    to: OrderedSet<S>,
    handler: Handler<S, A>,
}

impl<S: State, A: Action> Registration<S, A> {
    pub(crate) fn new(
        action: A,
        from: OrderedSet<S>,
        to: OrderedSet<S>,
        handler: Handler<S, A>,
    ) -> Self {
        Self {
            action,
            from,
            to,
            handler,
        }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    /// States the action may be performed from, in registration order.
    pub fn from_states(&self) -> &OrderedSet<S> {
        &self.from
    }

    /// States the handler is allowed to return, in registration order.
    pub fn to_states(&self) -> &OrderedSet<S> {
        &self.to
    }

    /// Check if the action may start from `current`.
    pub fn can_start_from(&self, current: &S) -> bool {
        self.from.contains(current)
    }

    /// Check if `target` is a declared target of the action.
    pub fn allows_target(&self, target: &S) -> bool {
        self.to.contains(target)
    }

    pub(crate) fn handler(&self) -> Handler<S, A> {
        Rc::clone(&self.handler)
    }
}

impl<S: State, A: Action> Clone for Registration<S, A> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<S: State, A: Action> fmt::Debug for Registration<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("action", &self.action)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Record of a single successful transition, handed to listeners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition<S: State, A: Action> {
    /// The action that caused the transition
    pub action: A,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub at: DateTime<Utc>,
}

impl<S: State, A: Action> Transition<S, A> {
    /// Whether the machine stayed in the same state.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Action table keyed by action, iterated in registration order.
///
/// Re-registering an action replaces its entry in place.
pub(crate) struct ActionTable<S: State, A: Action> {
    entries: Vec<Rc<Registration<S, A>>>,
    index: HashMap<A, usize>,
}

impl<S: State, A: Action> ActionTable<S, A> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a registration, returning `true` if it replaced an earlier one.
    pub(crate) fn insert(&mut self, registration: Registration<S, A>) -> bool {
        let entry = Rc::new(registration);
        match self.index.get(entry.action()) {
            Some(&position) => {
                self.entries[position] = entry;
                true
            }
            None => {
                self.index
                    .insert(entry.action().clone(), self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }

    pub(crate) fn get(&self, action: &A) -> Option<Rc<Registration<S, A>>> {
        self.index
            .get(action)
            .map(|&position| Rc::clone(&self.entries[position]))
    }

    pub(crate) fn snapshot(&self) -> Vec<Rc<Registration<S, A>>> {
        self.entries.clone()
    }

    pub(crate) fn actions(&self) -> Vec<A> {
        self.entries.iter().map(|e| e.action().clone()).collect()
    }
}
