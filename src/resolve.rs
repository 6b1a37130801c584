//! Feature resolution
//!
//! Turns a user selection into the effective feature set: defaults merged
//! with explicit toggles, unknown names rejected, and each enabled feature
//! paired with its user config fragment. Also aggregates the package
//! dependencies the enabled set requires.

use crate::error::GenerateError;
use crate::features::{FeatureKind, FeatureRegistry, FeatureSelection, FeatureSetting};
use serde_json::Value;
use tracing::debug;

/// Packages required no matter which features are enabled.
pub const ESSENTIAL_DEPS: &[&str] = &["webpack", "webpack-cli"];

/// One enabled feature with its effective user config.
#[derive(Debug, Clone)]
pub struct EnabledFeature {
    pub kind: FeatureKind,
    /// The user's fragment if they passed an object, else an empty object.
    pub user_config: Value,
}

/// The effective feature set, in registry order.
#[derive(Debug, Clone)]
pub struct ResolvedFeatures {
    enabled: Vec<EnabledFeature>,
}

impl ResolvedFeatures {
    pub fn is_enabled(&self, kind: FeatureKind) -> bool {
        self.enabled.iter().any(|f| f.kind == kind)
    }

    pub fn user_config(&self, kind: FeatureKind) -> Option<&Value> {
        self.enabled
            .iter()
            .find(|f| f.kind == kind)
            .map(|f| &f.user_config)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnabledFeature> {
        self.enabled.iter()
    }

    /// The order-preserving, deduplicated union of enabled features'
    /// dependencies, followed by the essential packages.
    pub fn required_dependencies(&self, registry: &FeatureRegistry) -> Vec<String> {
        let mut required: Vec<String> = Vec::new();
        let feature_deps = self
            .enabled
            .iter()
            .flat_map(|f| registry.get(f.kind).dependencies.iter());
        for dep in feature_deps.chain(ESSENTIAL_DEPS.iter()) {
            if !required.iter().any(|d| d == dep) {
                required.push((*dep).to_string());
            }
        }
        required
    }
}

/// Computes the effective feature set for a selection.
///
/// A feature is enabled if the user set it to `true` or an object, disabled
/// if they set it to `false`, and otherwise follows its registry default.
/// Any selection key the registry does not know fails with
/// [`GenerateError::UnknownFeature`] before anything else runs.
pub fn resolve(
    registry: &FeatureRegistry,
    selection: &FeatureSelection,
) -> Result<ResolvedFeatures, GenerateError> {
    for name in selection.features.keys() {
        if FeatureKind::from_name(name).is_none() {
            return Err(GenerateError::UnknownFeature(name.clone()));
        }
    }

    let enabled: Vec<EnabledFeature> = registry
        .iter()
        .filter_map(|def| {
            let setting = selection.setting(def.name());
            let on = setting.map_or(def.enabled_by_default, FeatureSetting::is_enabled);
            if !on {
                return None;
            }
            let user_config = match setting {
                Some(FeatureSetting::Configured(map)) => Value::Object(map.clone()),
                _ => Value::Object(serde_json::Map::new()),
            };
            Some(EnabledFeature {
                kind: def.kind,
                user_config,
            })
        })
        .collect();

    debug!(
        enabled = ?enabled.iter().map(|f| f.kind.name()).collect::<Vec<_>>(),
        "resolved feature set"
    );

    Ok(ResolvedFeatures { enabled })
}
