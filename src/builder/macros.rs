//! Macros for ergonomic state and action definitions.

/// Generate a `State` implementation for a simple enum.
///
/// # Example
///
/// ```
/// use switchyard::state_enum;
/// use switchyard::core::State;
///
/// state_enum! {
///     pub enum LoadState {
///         Empty,
///         Loading,
///         Complete,
///         Failed,
///     }
///     final: [Complete]
/// }
///
/// assert_eq!(LoadState::Loading.name(), "Loading");
/// assert!(LoadState::Complete.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

/// Generate an `Action` implementation for a simple enum.
///
/// # Example
///
/// ```
/// use switchyard::action_enum;
/// use switchyard::core::Action;
///
/// action_enum! {
///     pub enum LoadAction {
///         Load,
///         FinishLoading,
///     }
/// }
///
/// assert_eq!(LoadAction::FinishLoading.name(), "FinishLoading");
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Action for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
