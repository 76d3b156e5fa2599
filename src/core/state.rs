//! Value traits for machine states and actions.
//!
//! The machine never looks inside a state or an action. It only compares,
//! hashes and clones them, and asks for a name when rendering or logging.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history and transition records
/// - `Eq` + `Hash`: states are members of from/to sets and listener filters
/// - `Debug`: states appear in diagnostics
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum LoadState {
///     Empty,
///     Loading,
///     Complete,
///     Failed,
/// }
///
/// impl State for LoadState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Empty => "Empty",
///             Self::Loading => "Loading",
///             Self::Complete => "Complete",
///             Self::Failed => "Failed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Complete)
///     }
/// }
///
/// assert_eq!(LoadState::Loading.name(), "Loading");
/// assert!(LoadState::Complete.is_final());
/// ```
pub trait State: Clone + Eq + Hash + Debug {
    /// Stable textual representation, used as the graph label.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Trait for actions that may move a machine between states.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Action;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum LoadAction {
///     Load,
///     FinishLoading,
/// }
///
/// impl Action for LoadAction {
///     fn name(&self) -> &str {
///         match self {
///             Self::Load => "Load",
///             Self::FinishLoading => "FinishLoading",
///         }
///     }
/// }
///
/// assert_eq!(LoadAction::FinishLoading.name(), "FinishLoading");
/// ```
pub trait Action: Clone + Eq + Hash + Debug {
    /// Stable textual representation, used as the graph label.
    fn name(&self) -> &str;
}
