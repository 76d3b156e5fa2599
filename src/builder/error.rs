//! Build errors for machine and action builders.

use thiserror::Error;

/// Errors that can occur when building machines and action registrations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Action not specified. Call .action(action)")]
    MissingAction,

    #[error("No source states given. Call .from(states) with at least one state")]
    EmptyFromStates,

    #[error("No target states given. Call .to(states) with at least one state")]
    EmptyToStates,

    #[error("Handler not specified. Call .handler(f) or .goes_to(state)")]
    MissingHandler,

    #[error("Invalid action registration: {}", list(.0))]
    Invalid(Vec<BuildError>),
}

fn list(errors: &[BuildError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
