//! Built-in feature registry

use super::{FeatureDefinition, FeatureKind};
use crate::rules::RuleCategory;
use serde_json::{json, Value};

/// Registry of known features, in fixed order.
///
/// Order matters: within a rule category, priority ties are broken by the
/// position a feature holds here.
#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    definitions: Vec<FeatureDefinition>,
}

impl FeatureRegistry {
    pub fn with_defaults() -> Self {
        Self {
            definitions: vec![
                FeatureDefinition {
                    kind: FeatureKind::Babel,
                    enabled_by_default: true,
                    dependencies: &["babel-loader", "@babel/core", "@babel/preset-env"],
                    rule_category: Some(RuleCategory::Script),
                    priority: 10,
                    default_rule_config: babel_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Typescript,
                    enabled_by_default: false,
                    dependencies: &["typescript", "ts-loader"],
                    rule_category: Some(RuleCategory::Script),
                    priority: 20,
                    default_rule_config: typescript_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::React,
                    enabled_by_default: false,
                    dependencies: &["react", "react-dom", "@babel/preset-react"],
                    rule_category: Some(RuleCategory::Script),
                    priority: 30,
                    default_rule_config: react_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Css,
                    enabled_by_default: true,
                    dependencies: &["style-loader", "css-loader"],
                    rule_category: Some(RuleCategory::Style),
                    priority: 10,
                    default_rule_config: css_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Postcss,
                    enabled_by_default: false,
                    dependencies: &[
                        "style-loader",
                        "css-loader",
                        "postcss",
                        "postcss-loader",
                        "autoprefixer",
                    ],
                    rule_category: Some(RuleCategory::Style),
                    priority: 20,
                    default_rule_config: postcss_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Sass,
                    enabled_by_default: false,
                    dependencies: &["style-loader", "css-loader", "sass", "sass-loader"],
                    rule_category: Some(RuleCategory::Style),
                    priority: 30,
                    default_rule_config: sass_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Compress,
                    enabled_by_default: false,
                    dependencies: &["terser-webpack-plugin"],
                    rule_category: None,
                    priority: 0,
                    default_rule_config: empty_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Node,
                    enabled_by_default: false,
                    dependencies: &[],
                    rule_category: None,
                    priority: 0,
                    default_rule_config: empty_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Polyfill,
                    enabled_by_default: false,
                    dependencies: &["babel-polyfill"],
                    rule_category: None,
                    priority: 0,
                    default_rule_config: empty_defaults,
                },
                FeatureDefinition {
                    kind: FeatureKind::Media,
                    enabled_by_default: true,
                    dependencies: &["url-loader", "file-loader"],
                    rule_category: None,
                    priority: 0,
                    default_rule_config: media_defaults,
                },
            ],
        }
    }

    pub fn get(&self, kind: FeatureKind) -> &FeatureDefinition {
        // with_defaults covers every kind, so lookup cannot miss
        self.definitions
            .iter()
            .find(|d| d.kind == kind)
            .unwrap_or_else(|| unreachable!("registry is missing {kind}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn empty_defaults() -> Value {
    json!({})
}

fn babel_defaults() -> Value {
    json!({
        "test": "\\.jsx?$",
        "exclude": "node_modules",
        "loader": "babel-loader",
        "options": {
            "presets": [["@babel/preset-env", {"targets": "defaults"}]],
            "cacheDirectory": true
        }
    })
}

fn typescript_defaults() -> Value {
    json!({
        "test": "\\.[jt]sx?$",
        "exclude": "node_modules",
        "loader": "ts-loader",
        "options": {"transpileOnly": true}
    })
}

fn react_defaults() -> Value {
    json!({
        "options": {
            "presets": [
                ["@babel/preset-env", {"targets": "defaults"}],
                "@babel/preset-react"
            ],
            "cacheDirectory": true
        }
    })
}

fn css_defaults() -> Value {
    json!({
        "test": "\\.css$",
        "use": ["style-loader", "css-loader"]
    })
}

fn postcss_defaults() -> Value {
    json!({
        "test": "\\.css$",
        "use": ["style-loader", "css-loader", "postcss-loader"]
    })
}

fn sass_defaults() -> Value {
    json!({
        "test": "\\.s[ac]ss$",
        "use": ["style-loader", "css-loader", "sass-loader"]
    })
}

fn media_defaults() -> Value {
    json!({"loadImgWithUrlLoader": true})
}
