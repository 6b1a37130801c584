//! Webpack rule construction
//!
//! Rule categories are the grouping key for feature contributions: several
//! features may target the same category (css, postcss and sass all shape
//! the style rule) and are merged by priority before the category's builder
//! turns the folded config into concrete webpack rules.
//!
//! The catch-all file rule is distinguished at construction time via
//! [`ModuleRule::CatchAll`], so placement logic never has to hunt for it by
//! tag.

use serde_json::{json, Value};

pub mod compose;

pub use compose::compose_rules;

/// Rule categories features can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Script,
    Style,
}

impl RuleCategory {
    /// Emission order of categories in the final rule list.
    pub const ALL: [RuleCategory; 2] = [RuleCategory::Script, RuleCategory::Style];

    pub fn name(&self) -> &'static str {
        match self {
            RuleCategory::Script => "script",
            RuleCategory::Style => "style",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A built webpack rule, tagged by its placement role.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleRule {
    /// Evaluated in contribution order.
    Ordinary(Value),
    /// The file fallback; always placed last in the selector.
    CatchAll(Value),
}

impl ModuleRule {
    pub fn into_value(self) -> Value {
        match self {
            ModuleRule::Ordinary(v) | ModuleRule::CatchAll(v) => v,
        }
    }
}

/// Builds the rules for one category from its folded feature config.
///
/// Builders are pure: same config in, same rules out.
pub fn build_category(category: RuleCategory, config: &Value) -> Vec<ModuleRule> {
    match category {
        RuleCategory::Script => vec![script_rule(config)],
        RuleCategory::Style => vec![style_rule(config)],
    }
}

fn script_rule(config: &Value) -> ModuleRule {
    // The folded config already carries each feature's defaults, so fields
    // are read with plain fallbacks instead of another merge pass.
    ModuleRule::Ordinary(json!({
        "test": field_or(config, "test", json!("\\.jsx?$")),
        "exclude": field_or(config, "exclude", json!("node_modules")),
        "use": [{
            "loader": field_or(config, "loader", json!("babel-loader")),
            "options": field_or(config, "options", json!({}))
        }]
    }))
}

fn style_rule(config: &Value) -> ModuleRule {
    ModuleRule::Ordinary(json!({
        "test": field_or(config, "test", json!("\\.css$")),
        "use": field_or(config, "use", json!(["style-loader", "css-loader"]))
    }))
}

fn field_or(config: &Value, key: &str, fallback: Value) -> Value {
    config.get(key).cloned().unwrap_or(fallback)
}

/// url-loader arm for the media selector; inlines small images.
pub fn image_rule(config: &Value) -> ModuleRule {
    let limit = config.get("limit").cloned().unwrap_or(json!(8192));
    ModuleRule::Ordinary(json!({
        "test": "\\.(png|jpe?g|gif|svg)$",
        "loader": "url-loader",
        "options": {
            "limit": limit,
            "name": "static/media/[name].[hash:8].[ext]"
        }
    }))
}

/// The fallback arm: anything no other rule claimed goes through
/// file-loader. Scripts, html and json are excluded so webpack's own
/// handling still applies to them.
pub fn file_rule() -> ModuleRule {
    ModuleRule::CatchAll(json!({
        "exclude": ["\\.jsx?$", "\\.html$", "\\.json$"],
        "loader": "file-loader",
        "options": {
            "name": "static/media/[name].[hash:8].[ext]"
        }
    }))
}
