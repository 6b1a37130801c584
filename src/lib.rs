//! bundlerig - feature-driven webpack configuration generator
//!
//! This library composes a complete webpack configuration from a declarative
//! set of named features (typescript support, sass compilation, polyfills,
//! image loading, ...). Given a user selection of enabled features and an
//! optional raw override config, it validates that the packages the enabled
//! features need are installed, merges per-feature rules by priority, and
//! overlays the result onto a base configuration.
//!
//! # Core Concepts
//!
//! - **Features**: named, independently toggleable units of build behavior,
//!   described statically in the [`features::FeatureRegistry`]
//! - **Rule categories**: groups (script, style) that several features may
//!   contribute to; contributions merge in priority order
//! - **Probe**: the only external capability, a read-only check that a
//!   package or project file exists ([`deps::DependencyProbe`])
//!
//! # Example Usage
//!
//! ```no_run
//! use bundlerig::deps::NodeModulesProbe;
//! use bundlerig::features::FeatureSelection;
//! use bundlerig::generate::generate;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let selection = FeatureSelection::from_value(json!({
//!     "typescript": true,
//!     "sass": {"test": "\\.scss$"}
//! }))?;
//! let overrides = json!({
//!     "entry": "./src/index.ts",
//!     "output": {"path": "dist", "filename": "bundle.js"}
//! });
//!
//! let probe = NodeModulesProbe::new(".");
//! let generated = generate(&selection, overrides, &probe)?;
//! println!("{}", serde_json::to_string_pretty(&generated.config)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`features`]: feature definitions and the built-in registry
//! - [`resolve`]: effective feature set and dependency aggregation
//! - [`deps`]: dependency validation behind the probe seam
//! - [`rules`]: rule categories, builders, and priority composition
//! - [`merge`]: deep and shallow merge primitives
//! - [`generate`]: the end-to-end pipeline
//! - [`validate`]: sanity checks over the merged configuration

// Public modules
pub mod base;
pub mod cli;
pub mod deps;
pub mod error;
pub mod features;
pub mod generate;
pub mod merge;
pub mod resolve;
pub mod rules;
pub mod util;
pub mod validate;

// Re-export key types for convenient access
pub use deps::{DependencyProbe, NodeModulesProbe};
pub use error::{GenerateError, Warning};
pub use features::{FeatureKind, FeatureRegistry, FeatureSelection, FeatureSetting};
pub use generate::{generate, GeneratedConfig};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
