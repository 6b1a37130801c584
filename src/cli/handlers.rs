//! Command handlers
//!
//! Each handler maps a subcommand to a process exit code. This is the only
//! layer that touches stdout/stderr or exits: the library itself returns
//! `Result`s and leaves surfacing to the caller.

use super::commands::{FeaturesArgs, GenerateArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::deps::NodeModulesProbe;
use crate::features::{FeatureRegistry, FeatureSelection};
use crate::generate::generate;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    match run_generate(args, quiet) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            1
        }
    }
}

fn run_generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let project_root = args
        .project_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    // only the implicit default may be absent; an explicit --config path
    // that does not exist is an error, not "use defaults"
    let selection_value = match &args.config {
        Some(path) => read_json(path)?,
        None => read_json_if_present(&project_root.join("bundlerig.json"))?,
    };
    let selection = FeatureSelection::from_value(selection_value)?;

    let overrides = match &args.merge_config {
        Some(path) => read_json(path)?,
        None => json!({}),
    };

    let probe = NodeModulesProbe::new(&project_root);
    let generated = generate(&selection, overrides, &probe)?;

    if !quiet {
        for warning in &generated.warnings {
            warn!("{warning}");
            eprintln!("WARNING: {warning}");
        }
    }

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let rendered = formatter.format_config(&generated)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), "configuration written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

pub fn handle_features(args: &FeaturesArgs) -> i32 {
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match formatter.format_features(&FeatureRegistry::with_defaults()) {
        Ok(rendered) => {
            println!("{rendered}");
            0
        }
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            1
        }
    }
}

/// Reads a JSON file; a missing file is an empty document, not an error.
/// Used only for the implicit selection-file default (all defaults apply).
fn read_json_if_present(path: &Path) -> Result<Value> {
    if !path.is_file() {
        debug!(path = %path.display(), "no selection file, using defaults");
        return Ok(Value::Null);
    }
    read_json(path)
}

fn read_json(path: &Path) -> Result<Value> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
