//! Feature definitions
//!
//! Features are the user-facing unit of build behavior: a named toggle
//! (typescript support, sass compilation, a polyfill shim) that the
//! generator expands into webpack rules and package requirements. The set
//! of features is closed, so they are modeled as an enum rather than
//! runtime-registered trait objects; dispatch is exhaustive matching.

use crate::rules::RuleCategory;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub mod registry;

pub use registry::FeatureRegistry;

/// Every feature the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Babel,
    Typescript,
    React,
    Css,
    Postcss,
    Sass,
    Compress,
    Node,
    Polyfill,
    Media,
}

impl FeatureKind {
    /// All kinds, in registry order. Ordering is part of the contract:
    /// priority ties between features are broken by this order.
    pub const ALL: [FeatureKind; 10] = [
        FeatureKind::Babel,
        FeatureKind::Typescript,
        FeatureKind::React,
        FeatureKind::Css,
        FeatureKind::Postcss,
        FeatureKind::Sass,
        FeatureKind::Compress,
        FeatureKind::Node,
        FeatureKind::Polyfill,
        FeatureKind::Media,
    ];

    /// The key used for this feature in user selections.
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Babel => "babel",
            FeatureKind::Typescript => "typescript",
            FeatureKind::React => "react",
            FeatureKind::Css => "css",
            FeatureKind::Postcss => "postcss",
            FeatureKind::Sass => "sass",
            FeatureKind::Compress => "compress",
            FeatureKind::Node => "node",
            FeatureKind::Polyfill => "polyfill",
            FeatureKind::Media => "media",
        }
    }

    pub fn from_name(name: &str) -> Option<FeatureKind> {
        FeatureKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one feature.
#[derive(Debug, Clone)]
pub struct FeatureDefinition {
    pub kind: FeatureKind,
    pub enabled_by_default: bool,
    /// Packages this feature requires at build time.
    pub dependencies: &'static [&'static str],
    /// Rule category this feature contributes to; `None` for features with
    /// no rule effect (polyfill, node, ...).
    pub rule_category: Option<RuleCategory>,
    /// Ordering key within a rule category; lower merges first, so higher
    /// priorities override on conflicting options.
    pub priority: i32,
    /// Fragment merged underneath the user's per-feature config.
    pub default_rule_config: fn() -> Value,
}

impl FeatureDefinition {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// One entry of a user's feature selection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeatureSetting {
    /// `true` enables with defaults, `false` disables.
    Toggle(bool),
    /// An object enables the feature with config overrides.
    Configured(Map<String, Value>),
}

impl FeatureSetting {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, FeatureSetting::Toggle(false))
    }
}

/// Cross-cutting flags passed alongside the feature toggles.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorContext {
    pub production: bool,
}

/// The user's parsed selection document.
///
/// The document is a flat object whose keys are feature names, except the
/// reserved `context` key which carries [`GeneratorContext`]. Unknown
/// feature names are kept here verbatim and rejected during resolution.
#[derive(Debug, Clone, Default)]
pub struct FeatureSelection {
    pub features: BTreeMap<String, FeatureSetting>,
    pub context: GeneratorContext,
}

impl FeatureSelection {
    /// Parses a selection document from its JSON form.
    pub fn from_value(value: Value) -> Result<FeatureSelection, crate::error::GenerateError> {
        use crate::error::GenerateError;

        let root = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(FeatureSelection::default()),
            other => {
                return Err(GenerateError::InvalidSelection(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut selection = FeatureSelection::default();
        for (key, val) in root {
            if key == "context" {
                selection.context = serde_json::from_value(val)
                    .map_err(|e| GenerateError::InvalidSelection(e.to_string()))?;
                continue;
            }
            let setting = serde_json::from_value(val).map_err(|_| {
                GenerateError::InvalidSelection(format!(
                    "feature '{key}' must be a boolean or an object"
                ))
            })?;
            selection.features.insert(key, setting);
        }
        Ok(selection)
    }

    /// Builds a selection programmatically; used by tests and embedders.
    pub fn with_feature(mut self, name: &str, setting: FeatureSetting) -> Self {
        self.features.insert(name.to_string(), setting);
        self
    }

    pub fn setting(&self, name: &str) -> Option<&FeatureSetting> {
        self.features.get(name)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
