//! Solver configuration.
use serde::Deserialize;

/// Declares `SolverConfig` and `SolverConfigUpdate` from one list of documented options.
///
/// The doc comment of each option is also its entry in [`SolverConfig::help`].
macro_rules! solver_config {
    ($(
        $(#[doc = $doc:literal])*
        $name:ident: $ty:ty = $default:expr,
    )*) => {
        /// Configurable parameters used during solving.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct SolverConfig {
            $(
                $(#[doc = $doc])*
                pub $name: $ty,
            )*
        }

        impl Default for SolverConfig {
            fn default() -> SolverConfig {
                SolverConfig {
                    $($name: $default,)*
                }
            }
        }

        impl SolverConfig {
            /// Description of all options and their defaults.
            pub fn help() -> String {
                let mut help = String::new();
                $(
                    help.push_str(&format!("{}:\n   ", stringify!($name)));
                    $(
                        help.push(' ');
                        help.push_str($doc.trim());
                    )*
                    help.push_str(&format!(" (Default: {})\n", $default));
                )*
                help
            }
        }

        /// Partial configuration.
        ///
        /// Options that are `None` leave the corresponding setting unchanged.
        #[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct SolverConfigUpdate {
            $(pub $name: Option<$ty>,)*
        }

        impl SolverConfigUpdate {
            /// Create an empty update.
            pub fn new() -> SolverConfigUpdate {
                SolverConfigUpdate::default()
            }

            /// Combine two updates, options set in `other` take precedence.
            pub fn merge(&mut self, other: SolverConfigUpdate) {
                $(
                    if other.$name.is_some() {
                        self.$name = other.$name;
                    }
                )*
            }

            /// Overwrite the options of `config` that this update sets.
            pub fn apply(&self, config: &mut SolverConfig) {
                $(
                    if let Some(value) = &self.$name {
                        config.$name = value.clone();
                    }
                )*
            }
        }
    };
}

solver_config! {
    /// Check the operand count of every connective before solving.
    validate_formulas: bool = true,

    /// Search with a heap allocated stack instead of recursion.
    explicit_stack: bool = false,

    /// Verify that a found model satisfies the input formula.
    self_check: bool = false,
}
