//! Configuration generation pipeline
//!
//! The end-to-end flow: resolve the feature set, validate dependencies,
//! compose rules, assemble `module.rules`, overlay base config and user
//! overrides, sanity-check the result. Pure except for the two read-only
//! probe checks; all fatal conditions surface before any configuration is
//! returned.

use crate::base::base_config;
use crate::deps::{validate_dependencies, DependencyProbe};
use crate::error::{GenerateError, Warning};
use crate::features::{FeatureKind, FeatureRegistry, FeatureSelection};
use crate::merge::{deep_merge, deep_merge_all};
use crate::resolve::{resolve, ResolvedFeatures};
use crate::rules::{compose_rules, file_rule, image_rule, ModuleRule};
use crate::validate::SanityChecker;
use serde_json::{json, Value};
use tracing::info;

/// A successfully generated configuration plus its non-fatal diagnostics.
#[derive(Debug, Clone)]
pub struct GeneratedConfig {
    pub config: Value,
    pub warnings: Vec<Warning>,
}

/// Generates a webpack configuration for a feature selection.
///
/// `overrides` is a raw config in webpack's own schema, merged last so it
/// wins every conflict; it must supply `entry` and `output` if the base and
/// feature layers do not.
pub fn generate(
    selection: &FeatureSelection,
    overrides: Value,
    probe: &dyn DependencyProbe,
) -> Result<GeneratedConfig, GenerateError> {
    let registry = FeatureRegistry::with_defaults();
    let resolved = resolve(&registry, selection)?;
    validate_dependencies(&registry, &resolved, probe)?;

    let composed = compose_rules(&registry, &resolved);
    let rules = assemble_module_rules(&registry, &resolved, composed);

    let merged = deep_merge_all([
        base_config(&selection.context),
        feature_overlay(&resolved),
        json!({"module": {"rules": rules}}),
        overrides,
    ]);

    let warnings = SanityChecker::new().run(&merged, &resolved)?;
    info!(warnings = warnings.len(), "configuration generated");

    Ok(GeneratedConfig {
        config: merged,
        warnings,
    })
}

/// Arranges the composed rules into the final `module.rules` value.
///
/// With media disabled the composed rules stand alone, in category order.
/// With media enabled everything nests inside a single `oneOf` selector:
/// the url-loader image arm first (unless switched off), the composed rules
/// in order, and the file-loader catch-all strictly last.
fn assemble_module_rules(
    registry: &FeatureRegistry,
    resolved: &ResolvedFeatures,
    composed: Vec<ModuleRule>,
) -> Value {
    if !resolved.is_enabled(FeatureKind::Media) {
        let flat: Vec<Value> = composed.into_iter().map(ModuleRule::into_value).collect();
        return Value::Array(flat);
    }

    let media_def = registry.get(FeatureKind::Media);
    let media_config = deep_merge(
        (media_def.default_rule_config)(),
        resolved
            .user_config(FeatureKind::Media)
            .cloned()
            .unwrap_or_else(|| json!({})),
    );
    let load_images = media_config
        .get("loadImgWithUrlLoader")
        .map_or(true, is_truthy);

    let mut arms: Vec<Value> = Vec::new();
    if load_images {
        arms.push(image_rule(&media_config).into_value());
    }
    arms.extend(composed.into_iter().map(ModuleRule::into_value));
    arms.push(file_rule().into_value());

    json!([{"oneOf": arms}])
}

/// JavaScript truthiness: `false`, `0`, `""` and `null` are falsy,
/// everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Top-level config effects of features that contribute no rules.
fn feature_overlay(resolved: &ResolvedFeatures) -> Value {
    let mut overlay = json!({});
    if resolved.is_enabled(FeatureKind::Node) {
        overlay = deep_merge(overlay, json!({"target": "node"}));
    }
    if resolved.is_enabled(FeatureKind::Compress) {
        overlay = deep_merge(overlay, json!({"optimization": {"minimize": true}}));
    }
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct InstalledEverything;

    impl DependencyProbe for InstalledEverything {
        fn is_installed(&self, _package: &str) -> bool {
            true
        }

        fn project_file_exists(&self, _relative: &Path) -> bool {
            true
        }
    }

    fn selection(value: Value) -> FeatureSelection {
        FeatureSelection::from_value(value).unwrap()
    }

    fn overrides() -> Value {
        json!({"entry": "./src/index.js", "output": {"path": "dist", "filename": "bundle.js"}})
    }

    #[test]
    fn test_media_selector_places_catch_all_last() {
        let generated = generate(
            &selection(json!({"sass": true})),
            overrides(),
            &InstalledEverything,
        )
        .unwrap();

        let rules = &generated.config["module"]["rules"];
        assert_eq!(rules.as_array().unwrap().len(), 1);
        let arms = rules[0]["oneOf"].as_array().unwrap();
        let last = arms.last().unwrap();
        assert_eq!(last["loader"], "file-loader");
        // image arm first, by default
        assert_eq!(arms[0]["loader"], "url-loader");
    }

    #[test]
    fn test_image_arm_can_be_switched_off() {
        let generated = generate(
            &selection(json!({"media": {"loadImgWithUrlLoader": false}})),
            overrides(),
            &InstalledEverything,
        )
        .unwrap();

        let arms = generated.config["module"]["rules"][0]["oneOf"]
            .as_array()
            .unwrap()
            .clone();
        assert!(arms.iter().all(|arm| arm["loader"] != "url-loader"));
        assert_eq!(arms.last().unwrap()["loader"], "file-loader");
    }

    #[test]
    fn test_falsy_image_toggle_values_switch_arm_off() {
        for toggle in [json!(0), json!(""), json!(null)] {
            let generated = generate(
                &selection(json!({"media": {"loadImgWithUrlLoader": toggle.clone()}})),
                overrides(),
                &InstalledEverything,
            )
            .unwrap();
            let arms = generated.config["module"]["rules"][0]["oneOf"]
                .as_array()
                .unwrap()
                .clone();
            assert!(
                arms.iter().all(|arm| arm["loader"] != "url-loader"),
                "toggle {toggle} did not disable the image arm"
            );
        }
    }

    #[test]
    fn test_overrides_win_scalar_conflicts() {
        let mut with_mode = overrides();
        with_mode["mode"] = json!("production");
        let generated = generate(&selection(json!({})), with_mode, &InstalledEverything).unwrap();
        assert_eq!(generated.config["mode"], "production");
    }

    #[test]
    fn test_node_and_compress_overlays() {
        let generated = generate(
            &selection(json!({"node": true, "compress": true})),
            overrides(),
            &InstalledEverything,
        )
        .unwrap();
        assert_eq!(generated.config["target"], "node");
        assert_eq!(generated.config["optimization"]["minimize"], true);
    }

    #[test]
    fn test_production_context_flows_into_mode() {
        let generated = generate(
            &selection(json!({"context": {"production": true}})),
            overrides(),
            &InstalledEverything,
        )
        .unwrap();
        assert_eq!(generated.config["mode"], "production");
        assert_eq!(generated.config["devtool"], "source-map");
    }
}
