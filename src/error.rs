//! Error and warning types for config generation
//!
//! Every fatal condition is detected before any configuration value is
//! returned, so callers never observe a half-built config. The only
//! non-fatal diagnostic is [`Warning`], which is returned as data alongside
//! the generated configuration rather than raised.

use thiserror::Error;

/// Fatal generation errors
#[derive(Debug, Error)]
pub enum GenerateError {
    /// User selection references a feature the registry does not know
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    /// One or more required packages are not installed
    #[error(
        "some packages are not installed, install these packages by running\n\n  yarn add {} --dev",
        .missing.join(" ")
    )]
    MissingDependencies { missing: Vec<String> },

    /// The typescript feature is enabled but no tsconfig.json exists
    #[error("typescript is enabled but tsconfig.json was not found; run `npx tsc --init` to create one")]
    MissingTsConfig,

    /// Merged configuration has no `entry` field
    #[error("generated configuration is missing `entry`")]
    MissingEntry,

    /// Merged configuration has no `output` field
    #[error("generated configuration is missing `output`")]
    MissingOutput,

    /// The feature selection document could not be interpreted
    #[error("invalid feature selection: {0}")]
    InvalidSelection(String),
}

/// Non-fatal diagnostics emitted alongside a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// polyfill is enabled but no entry path mentions the shim
    PolyfillMissing,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::PolyfillMissing => write!(
                f,
                "`babel-polyfill` should be placed in one of your entry paths in order to work"
            ),
        }
    }
}
