//! Builder for constructing machines.

use crate::builder::action::ActionBuilder;
use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Action, State};
use crate::machine::{Machine, Registration};

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<S: State, A: Action> {
    initial: Option<S>,
    config: MachineConfig,
    registrations: Vec<Registration<S, A>>,
}

impl<S: State, A: Action> MachineBuilder<S, A> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            initial: None,
            config: MachineConfig::default(),
            registrations: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the history bound. `0` disables history.
    pub fn max_history_length(mut self, length: usize) -> Self {
        self.config.max_history_length = length;
        self
    }

    /// Add an action using a builder.
    /// Returns an error if the builder fails validation.
    pub fn action(mut self, builder: ActionBuilder<S, A>) -> Result<Self, BuildError> {
        let registration = builder.build()?;
        self.registrations.push(registration);
        Ok(self)
    }

    /// Add a pre-built registration.
    pub fn register(mut self, registration: Registration<S, A>) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Add multiple registrations at once.
    pub fn registrations(mut self, registrations: Vec<Registration<S, A>>) -> Self {
        self.registrations.extend(registrations);
        self
    }

    /// Build the machine, registering actions in the order they were added.
    pub fn build(self) -> Result<Machine<S, A>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let machine = Machine::with_config(initial, &self.config);
        for registration in self.registrations {
            machine.register(registration);
        }

        Ok(machine)
    }
}

impl<S: State, A: Action> Default for MachineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
