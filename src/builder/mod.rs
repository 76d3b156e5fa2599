//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for creating machines
//! with minimal boilerplate. Registrations are validated here, before they
//! reach a machine.

pub mod action;
pub mod error;
pub mod machine;
pub mod macros;

pub use action::ActionBuilder;
pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::core::{Action, State};
use crate::machine::Registration;

/// Create a registration whose handler always moves to `to`.
///
/// # Example
///
/// ```
/// use switchyard::builder::fixed_action;
/// use switchyard::{action_enum, state_enum};
///
/// state_enum! {
///     enum Light { Red, Green }
/// }
///
/// action_enum! {
///     enum Signal { Go }
/// }
///
/// let go = fixed_action(Signal::Go, [Light::Red], Light::Green).unwrap();
/// assert!(go.can_start_from(&Light::Red));
/// assert!(go.allows_target(&Light::Green));
/// ```
pub fn fixed_action<S, A>(
    action: A,
    from: impl IntoIterator<Item = S>,
    to: S,
) -> Result<Registration<S, A>, BuildError>
where
    S: State + 'static,
    A: Action + 'static,
{
    ActionBuilder::new()
        .action(action)
        .from(from)
        .goes_to(to)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Start,
        Middle,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Advance;

    impl Action for Advance {
        fn name(&self) -> &str {
            "Advance"
        }
    }

    #[test]
    fn fixed_action_builds() {
        let registration = fixed_action(Advance, [TestState::Start], TestState::Middle).unwrap();

        assert_eq!(registration.action(), &Advance);
        assert!(registration.can_start_from(&TestState::Start));
        assert!(!registration.can_start_from(&TestState::Middle));
    }

    #[test]
    fn fixed_action_requires_source() {
        let result = fixed_action(Advance, Vec::new(), TestState::Middle);
        assert!(matches!(result, Err(BuildError::EmptyFromStates)));
    }

    #[test]
    fn fixed_action_moves_machine() {
        let machine = Machine::new(TestState::Start, 2);
        machine.register(fixed_action(Advance, [TestState::Start], TestState::Middle).unwrap());

        assert_eq!(machine.perform_action(&Advance), Some(TestState::Middle));
    }
}
