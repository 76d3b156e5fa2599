//! Change listeners.

use crate::core::{Action, OrderedSet, State};
use crate::machine::{Machine, Transition};

/// Callback invoked after a matching transition.
///
/// The machine is lent to the callback for the duration of the call; a
/// listener never owns the machine it observes.
pub type ListenerCallback<S, A> = Box<dyn Fn(&Machine<S, A>, &Transition<S, A>)>;

/// A registered listener with optional source and target filters.
///
/// An absent filter matches every state.
pub(crate) struct Listener<S: State, A: Action> {
    from: Option<OrderedSet<S>>,
    to: Option<OrderedSet<S>>,
    callback: ListenerCallback<S, A>,
}

impl<S: State, A: Action> Listener<S, A> {
    pub(crate) fn new(
        from: Option<OrderedSet<S>>,
        to: Option<OrderedSet<S>>,
        callback: ListenerCallback<S, A>,
    ) -> Self {
        Self { from, to, callback }
    }

    /// Check if a transition from `old` to `new` passes both filters.
    pub(crate) fn matches(&self, old: &S, new: &S) -> bool {
        self.from.as_ref().is_none_or(|states| states.contains(old))
            && self.to.as_ref().is_none_or(|states| states.contains(new))
    }

    pub(crate) fn notify(&self, machine: &Machine<S, A>, transition: &Transition<S, A>) {
        (self.callback)(machine, transition)
    }
}
