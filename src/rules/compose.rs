//! Rule composition
//!
//! Collects the rule contributions of enabled features, orders them, merges
//! their configs, and invokes the per-category builders. Precedence is
//! two-tier: inside one feature the user fragment deep-merges over the
//! feature's default fragment; across features of the same category the
//! fold is a shallow top-level override, so a higher-priority feature wins
//! conflicting options outright.

use super::{build_category, ModuleRule, RuleCategory};
use crate::features::FeatureRegistry;
use crate::merge::{deep_merge, shallow_override};
use crate::resolve::ResolvedFeatures;
use serde_json::Value;
use tracing::debug;

/// Composes the rule list, ordered by category then contribution.
///
/// Categories with no enabled contributors simply produce nothing. The
/// result is deterministic for a given feature set: contributions are
/// stable-sorted by priority, ties keeping registry order.
pub fn compose_rules(registry: &FeatureRegistry, resolved: &ResolvedFeatures) -> Vec<ModuleRule> {
    let mut rules = Vec::new();

    for category in RuleCategory::ALL {
        // registry order is preserved by the stable sort below
        let mut contributions: Vec<(i32, &Value, fn() -> Value)> = resolved
            .iter()
            .filter_map(|feature| {
                let def = registry.get(feature.kind);
                (def.rule_category == Some(category)).then_some((
                    def.priority,
                    &feature.user_config,
                    def.default_rule_config,
                ))
            })
            .collect();

        if contributions.is_empty() {
            continue;
        }

        contributions.sort_by_key(|(priority, _, _)| *priority);

        let folded = contributions
            .into_iter()
            .map(|(_, user_config, defaults)| deep_merge(defaults(), user_config.clone()))
            .fold(Value::Object(serde_json::Map::new()), shallow_override);

        let built = build_category(category, &folded);
        debug!(category = %category, rules = built.len(), "composed rule category");
        rules.extend(built);
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSelection;
    use crate::resolve::resolve;
    use serde_json::json;

    fn compose(selection: serde_json::Value) -> Vec<ModuleRule> {
        let registry = FeatureRegistry::with_defaults();
        let selection = FeatureSelection::from_value(selection).unwrap();
        let resolved = resolve(&registry, &selection).unwrap();
        compose_rules(&registry, &resolved)
    }

    #[test]
    fn test_defaults_compose_script_then_style() {
        let rules = compose(json!({}));
        assert_eq!(rules.len(), 2);
        let script = rules[0].clone().into_value();
        let style = rules[1].clone().into_value();
        assert_eq!(script["use"][0]["loader"], "babel-loader");
        assert_eq!(style["test"], "\\.css$");
    }

    #[test]
    fn test_higher_priority_feature_overrides_script_loader() {
        let rules = compose(json!({"typescript": true}));
        let script = rules[0].clone().into_value();
        // typescript (priority 20) wins over babel (priority 10)
        assert_eq!(script["use"][0]["loader"], "ts-loader");
        assert_eq!(script["test"], "\\.[jt]sx?$");
    }

    #[test]
    fn test_cross_feature_fold_is_shallow() {
        let rules = compose(json!({"sass": true}));
        let style = rules[1].clone().into_value();
        // sass replaces the whole `use` chain rather than appending to css's
        assert_eq!(
            style["use"],
            json!(["style-loader", "css-loader", "sass-loader"])
        );
        assert_eq!(style["test"], "\\.s[ac]ss$");
    }

    #[test]
    fn test_user_fragment_deep_merges_into_feature_defaults() {
        let rules = compose(json!({
            "typescript": {"options": {"happyPackMode": true}}
        }));
        let script = rules[0].clone().into_value();
        // transpileOnly from the default fragment survives the user override
        assert_eq!(script["use"][0]["options"]["transpileOnly"], true);
        assert_eq!(script["use"][0]["options"]["happyPackMode"], true);
    }

    #[test]
    fn test_disabled_category_is_absent() {
        let rules = compose(json!({"css": false}));
        assert_eq!(rules.len(), 1);
        let script = rules[0].clone().into_value();
        assert_eq!(script["use"][0]["loader"], "babel-loader");
    }

    #[test]
    fn test_composition_is_deterministic() {
        let sel = json!({"typescript": true, "sass": true, "postcss": true});
        let a: Vec<_> = compose(sel.clone())
            .into_iter()
            .map(ModuleRule::into_value)
            .collect();
        let b: Vec<_> = compose(sel)
            .into_iter()
            .map(ModuleRule::into_value)
            .collect();
        assert_eq!(a, b);
    }
}
