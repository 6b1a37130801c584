//! Output formatting
//!
//! Formatters for the two CLI surfaces: the generated configuration and the
//! feature listing. JSON is the machine-readable default for configs;
//! the human format adds a short summary before the pretty-printed body.

use anyhow::{Context, Result};
use crate::features::FeatureRegistry;
use crate::generate::GeneratedConfig;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

impl From<super::commands::OutputFormatArg> for OutputFormat {
    fn from(arg: super::commands::OutputFormatArg) -> Self {
        match arg {
            super::commands::OutputFormatArg::Json => OutputFormat::Json,
            super::commands::OutputFormatArg::Human => OutputFormat::Human,
        }
    }
}

/// Formatter for CLI output
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a generated configuration.
    pub fn format_config(&self, generated: &GeneratedConfig) -> Result<String> {
        let body = serde_json::to_string_pretty(&generated.config)
            .context("failed to serialize generated configuration")?;

        match self.format {
            OutputFormat::Json => Ok(body),
            OutputFormat::Human => {
                let mut out = String::new();
                out.push_str("Generated webpack configuration\n");
                if let Some(mode) = generated.config.get("mode").and_then(|m| m.as_str()) {
                    out.push_str(&format!("  Mode:     {mode}\n"));
                }
                let rule_count = generated
                    .config
                    .pointer("/module/rules")
                    .and_then(|r| r.as_array())
                    .map_or(0, Vec::len);
                out.push_str(&format!("  Rules:    {rule_count}\n"));
                out.push_str(&format!("  Warnings: {}\n\n", generated.warnings.len()));
                out.push_str(&body);
                Ok(out)
            }
        }
    }

    /// Formats the feature registry listing.
    pub fn format_features(&self, registry: &FeatureRegistry) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = registry
                    .iter()
                    .map(|def| {
                        serde_json::json!({
                            "name": def.name(),
                            "enabledByDefault": def.enabled_by_default,
                            "dependencies": def.dependencies,
                            "ruleCategory": def.rule_category.map(|c| c.name()),
                            "priority": def.priority,
                        })
                    })
                    .collect();
                serde_json::to_string_pretty(&entries).context("failed to serialize feature list")
            }
            OutputFormat::Human => {
                let mut out = String::from("Known features:\n\n");
                for def in registry.iter() {
                    let default = if def.enabled_by_default { "on" } else { "off" };
                    let category = def
                        .rule_category
                        .map_or("-".to_string(), |c| format!("{c} (priority {})", def.priority));
                    out.push_str(&format!(
                        "  {:<12} default {:<4} rule: {:<22} needs: {}\n",
                        def.name(),
                        default,
                        category,
                        if def.dependencies.is_empty() {
                            "-".to_string()
                        } else {
                            def.dependencies.join(", ")
                        }
                    ));
                }
                Ok(out)
            }
        }
    }
}
