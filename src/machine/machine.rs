//! The transition engine.

use crate::builder::{ActionBuilder, BuildError};
use crate::config::MachineConfig;
use crate::core::{Action, OrderedSet, State, StateHistory};
use crate::machine::deferred::{DeferredAction, DeferredQueue};
use crate::machine::listener::Listener;
use crate::machine::transition::{ActionTable, Registration, Transition, TransitionError};
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Marks the machine as running a transition until dropped.
struct RunningGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> RunningGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.get() {
            return None;
        }
        flag.set(true);
        Some(Self { flag })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// State machine that only changes state through registered actions.
///
/// All operations take `&self`: handlers and listeners are handed the
/// machine by reference, so they can read it while a transition is in
/// progress. Performing another action from inside a handler or listener is
/// rejected with [`TransitionError::Reentrant`]; queue follow-ups with
/// [`defer`](Self::defer) instead.
///
/// # Example
///
/// ```rust
/// use switchyard::machine::Machine;
/// use switchyard::{action_enum, state_enum};
///
/// state_enum! {
///     enum Load { Empty, Loading, Complete, Failed }
///     final: [Complete]
/// }
///
/// action_enum! {
///     enum Step { Start, Finish }
/// }
///
/// let machine = Machine::new(Load::Empty, 3);
/// machine
///     .register_action(Step::Start, [Load::Empty, Load::Failed], [Load::Loading], |_| Load::Loading)
///     .unwrap();
/// machine
///     .register_action(Step::Finish, [Load::Loading], [Load::Complete, Load::Failed], |_| Load::Complete)
///     .unwrap();
///
/// assert_eq!(machine.perform_action(&Step::Start), Some(Load::Loading));
/// assert_eq!(machine.perform_action(&Step::Finish), Some(Load::Complete));
/// assert_eq!(machine.perform_action(&Step::Start), None);
/// assert_eq!(machine.history(), vec![Load::Empty, Load::Loading, Load::Complete]);
/// assert!(machine.is_final());
/// ```
pub struct Machine<S: State, A: Action> {
    initial: S,
    current: RefCell<S>,
    history: RefCell<StateHistory<S>>,
    actions: RefCell<ActionTable<S, A>>,
    listeners: RefCell<Vec<Rc<Listener<S, A>>>>,
    deferred: RefCell<DeferredQueue<A>>,
    running: Cell<bool>,
}

impl<S: State, A: Action> Machine<S, A> {
    /// Create a machine in `initial`, keeping at most `max_history_length`
    /// states of history (`0` disables history).
    pub fn new(initial: S, max_history_length: usize) -> Self {
        let mut history = StateHistory::new(max_history_length);
        history.record(initial.clone());
        Self {
            current: RefCell::new(initial.clone()),
            initial,
            history: RefCell::new(history),
            actions: RefCell::new(ActionTable::new()),
            listeners: RefCell::new(Vec::new()),
            deferred: RefCell::new(DeferredQueue::new()),
            running: Cell::new(false),
        }
    }

    /// Create a machine from a configuration.
    pub fn with_config(initial: S, config: &MachineConfig) -> Self {
        Self::new(initial, config.max_history_length)
    }

    /// Get current state
    pub fn current_state(&self) -> S {
        self.current.borrow().clone()
    }

    /// State the machine was created in
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Check if machine is in a final state
    pub fn is_final(&self) -> bool {
        self.current.borrow().is_final()
    }

    /// Recorded states, oldest first. The last entry is the current state
    /// whenever history is enabled.
    pub fn history(&self) -> Vec<S> {
        self.history.borrow().to_vec()
    }

    pub fn max_history_length(&self) -> usize {
        self.history.borrow().max_len()
    }

    /// Whether a transition is currently executing.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Register an action, replacing any earlier registration of it.
    ///
    /// Both state sets must be non-empty. The handler is not checked here;
    /// its result is validated against `to` each time the action runs.
    pub fn register_action<F>(
        &self,
        action: A,
        from: impl IntoIterator<Item = S>,
        to: impl IntoIterator<Item = S>,
        handler: F,
    ) -> Result<(), BuildError>
    where
        F: Fn(&Machine<S, A>) -> S + 'static,
    {
        let registration = ActionBuilder::new()
            .action(action)
            .from(from)
            .to(to)
            .handler(handler)
            .build()?;
        self.register(registration);
        Ok(())
    }

    /// Register a pre-built action.
    pub fn register(&self, registration: Registration<S, A>) {
        let action = registration.action().name().to_string();
        let replaced = self.actions.borrow_mut().insert(registration);
        debug!(action = %action, replaced, "registered action");
    }

    /// Check if `action` is registered and legal from the current state.
    pub fn can_perform(&self, action: &A) -> bool {
        let registration = self.actions.borrow().get(action);
        registration.is_some_and(|r| r.can_start_from(&self.current.borrow()))
    }

    /// Registered actions in registration order.
    pub fn registered_actions(&self) -> Vec<A> {
        self.actions.borrow().actions()
    }

    /// Read-only snapshot of the action table in registration order.
    pub fn registrations(&self) -> Vec<Rc<Registration<S, A>>> {
        self.actions.borrow().snapshot()
    }

    /// Perform an action, returning the new state, or `None` if no
    /// transition happened.
    ///
    /// The reason for a failure is logged; use
    /// [`try_perform_action`](Self::try_perform_action) to receive it.
    pub fn perform_action(&self, action: &A) -> Option<S> {
        self.try_perform_action(action).ok()
    }

    /// Perform an action, reporting why it failed if no transition happened.
    pub fn try_perform_action(&self, action: &A) -> Result<S, TransitionError> {
        let Some(_running) = RunningGuard::enter(&self.running) else {
            warn!(
                action = action.name(),
                "rejected action performed while another transition was running"
            );
            return Err(TransitionError::Reentrant {
                action: action.name().to_string(),
            });
        };

        let registration = self.actions.borrow().get(action);
        let Some(registration) = registration else {
            warn!(action = action.name(), "rejected unregistered action");
            return Err(TransitionError::Unregistered {
                action: action.name().to_string(),
            });
        };

        let from = self.current_state();
        if !registration.can_start_from(&from) {
            warn!(
                action = action.name(),
                state = from.name(),
                "rejected action not allowed from current state"
            );
            return Err(TransitionError::IllegalSource {
                action: action.name().to_string(),
                state: from.name().to_string(),
            });
        }

        let handler = registration.handler();
        let target = handler(self);
        if !registration.allows_target(&target) {
            warn!(
                action = action.name(),
                state = from.name(),
                target = target.name(),
                "rejected undeclared target state returned by handler"
            );
            return Err(TransitionError::UndeclaredTarget {
                action: action.name().to_string(),
                target: target.name().to_string(),
            });
        }

        *self.current.borrow_mut() = target.clone();
        self.history.borrow_mut().record(target.clone());
        debug!(
            action = action.name(),
            from = from.name(),
            to = target.name(),
            "transitioned"
        );

        let transition = Transition {
            action: action.clone(),
            from,
            to: target.clone(),
            at: Utc::now(),
        };
        self.notify(&transition);

        Ok(target)
    }

    /// Register a listener for transitions whose old state is in `from` and
    /// whose new state is in `to`. `None` matches any state.
    ///
    /// Listeners run in registration order after the state and history have
    /// been updated. A listener registered while listeners are being
    /// notified is first called on the next transition.
    pub fn on_change<F>(
        &self,
        from: Option<OrderedSet<S>>,
        to: Option<OrderedSet<S>>,
        callback: F,
    ) where
        F: Fn(&Machine<S, A>, &Transition<S, A>) + 'static,
    {
        self.listeners
            .borrow_mut()
            .push(Rc::new(Listener::new(from, to, Box::new(callback))));
    }

    /// Register a listener for every transition.
    pub fn on_any_change<F>(&self, callback: F)
    where
        F: Fn(&Machine<S, A>, &Transition<S, A>) + 'static,
    {
        self.on_change(None, None, callback);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self, transition: &Transition<S, A>) {
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for (position, listener) in listeners.iter().enumerate() {
            if listener.matches(&transition.from, &transition.to) {
                trace!(
                    listener = position,
                    from = transition.from.name(),
                    to = transition.to.name(),
                    "notifying listener"
                );
                listener.notify(self, transition);
            }
        }
    }

    /// Queue `action` to run on the next [`run_deferred`](Self::run_deferred).
    pub fn defer(&self, action: A) -> DeferredAction {
        self.defer_until(action, Instant::now())
    }

    /// Queue `action` to run on the first drain at least `delay` from now.
    pub fn defer_after(&self, action: A, delay: Duration) -> DeferredAction {
        self.defer_until(action, Instant::now() + delay)
    }

    fn defer_until(&self, action: A, due: Instant) -> DeferredAction {
        debug!(action = action.name(), "deferred action");
        self.deferred.borrow_mut().push(action, due)
    }

    /// Number of deferred actions still waiting to run.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.borrow().pending()
    }

    /// Run every deferred action that is due now.
    pub fn run_deferred(&self) -> Vec<(A, Result<S, TransitionError>)> {
        self.run_deferred_at(Instant::now())
    }

    /// Run every deferred action due at `now`, in the order they were
    /// queued.
    ///
    /// Actions deferred while draining wait for the next drain. Nothing runs
    /// if called from inside a handler or listener.
    pub fn run_deferred_at(&self, now: Instant) -> Vec<(A, Result<S, TransitionError>)> {
        if self.running.get() {
            warn!("skipped deferred drain during a running transition");
            return Vec::new();
        }

        let due = self.deferred.borrow_mut().take_due(now);
        let mut results = Vec::with_capacity(due.len());
        for entry in due {
            // An earlier deferred action may have cancelled this one.
            if entry.is_cancelled() {
                continue;
            }
            entry.mark_fired();
            let result = self.try_perform_action(&entry.action);
            results.push((entry.action, result));
        }
        results
    }
}
