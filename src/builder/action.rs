//! Builder for action registrations.

use crate::builder::error::BuildError;
use crate::core::{Action, OrderedSet, State};
use crate::machine::{Handler, Machine, Registration};
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for action registrations with a fluent API.
///
/// Every problem is reported at once: a builder missing both its source
/// states and its handler fails with [`BuildError::Invalid`] listing both.
pub struct ActionBuilder<S: State, A: Action> {
    action: Option<A>,
    from: OrderedSet<S>,
    to: OrderedSet<S>,
    handler: Option<Handler<S, A>>,
}

impl<S: State, A: Action> ActionBuilder<S, A> {
    /// Create a new action builder.
    pub fn new() -> Self {
        Self {
            action: None,
            from: OrderedSet::new(),
            to: OrderedSet::new(),
            handler: None,
        }
    }

    /// Set the action being registered (required).
    pub fn action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add legal source states (at least one required).
    pub fn from(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.from.extend(states);
        self
    }

    /// Add legal target states (at least one required).
    pub fn to(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.to.extend(states);
        self
    }

    /// Set the handler choosing the target state (required).
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Machine<S, A>) -> S + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Declare `state` as a target and always move there.
    pub fn goes_to(mut self, state: S) -> Self
    where
        S: 'static,
    {
        self.to.insert(state.clone());
        self.handler = Some(Rc::new(move |_: &Machine<S, A>| state.clone()));
        self
    }

    /// Check every required field, collecting all problems.
    fn validate(&self) -> Result<(), BuildError> {
        let checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = vec![
            require(self.action.is_some(), BuildError::MissingAction),
            require(!self.from.is_empty(), BuildError::EmptyFromStates),
            require(!self.to.is_empty(), BuildError::EmptyToStates),
            require(self.handler.is_some(), BuildError::MissingHandler),
        ];

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                let mut errors: Vec<BuildError> = errors.iter().cloned().collect();
                if errors.len() == 1 {
                    Err(errors.remove(0))
                } else {
                    Err(BuildError::Invalid(errors))
                }
            }
        }
    }

    /// Build the registration.
    pub fn build(self) -> Result<Registration<S, A>, BuildError> {
        self.validate()?;
        let action = self.action.ok_or(BuildError::MissingAction)?;
        let handler = self.handler.ok_or(BuildError::MissingHandler)?;

        Ok(Registration::new(action, self.from, self.to, handler))
    }
}

impl<S: State, A: Action> Default for ActionBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

fn require(ok: bool, error: BuildError) -> Validation<(), NonEmptyVec<BuildError>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error)
    }
}
