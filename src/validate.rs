//! Final-configuration sanity checks
//!
//! Runs after merging, over the complete configuration. Checks either pass,
//! fail generation, or emit a non-fatal warning; they never mutate the
//! config.

use crate::error::{GenerateError, Warning};
use crate::features::FeatureKind;
use crate::resolve::ResolvedFeatures;
use serde_json::Value;

/// Substring identifying the polyfill shim in an entry path.
const POLYFILL_MARKER: &str = "babel-polyfill";

pub enum CheckOutcome {
    Pass,
    Warn(Warning),
    Fail(GenerateError),
}

/// One sanity check over the merged configuration.
pub trait ConfigCheck {
    fn name(&self) -> &'static str;
    fn check(&self, config: &Value, resolved: &ResolvedFeatures) -> CheckOutcome;
}

pub struct EntryPresent;

impl ConfigCheck for EntryPresent {
    fn name(&self) -> &'static str {
        "EntryPresent"
    }

    fn check(&self, config: &Value, _resolved: &ResolvedFeatures) -> CheckOutcome {
        if field_is_present(config, "entry") {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail(GenerateError::MissingEntry)
        }
    }
}

pub struct OutputPresent;

impl ConfigCheck for OutputPresent {
    fn name(&self) -> &'static str {
        "OutputPresent"
    }

    fn check(&self, config: &Value, _resolved: &ResolvedFeatures) -> CheckOutcome {
        if field_is_present(config, "output") {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail(GenerateError::MissingOutput)
        }
    }
}

/// Present means more than merely set: an empty string, array or object is
/// as useless to webpack as no field at all.
fn field_is_present(config: &Value, key: &str) -> bool {
    match config.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
    }
}

/// Warns when polyfill is enabled but no entry path loads the shim.
pub struct PolyfillInEntry;

impl ConfigCheck for PolyfillInEntry {
    fn name(&self) -> &'static str {
        "PolyfillInEntry"
    }

    fn check(&self, config: &Value, resolved: &ResolvedFeatures) -> CheckOutcome {
        if !resolved.is_enabled(FeatureKind::Polyfill) {
            return CheckOutcome::Pass;
        }
        let entry = config.get("entry").unwrap_or(&Value::Null);
        if entry_mentions(entry, POLYFILL_MARKER) {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Warn(Warning::PolyfillMissing)
        }
    }
}

/// Scans an entry value for a marker. Entry may be a single path, a list of
/// paths, or a map from chunk name to either.
fn entry_mentions(entry: &Value, marker: &str) -> bool {
    match entry {
        Value::String(path) => path.contains(marker),
        Value::Array(paths) => paths.iter().any(|p| entry_mentions(p, marker)),
        Value::Object(chunks) => chunks.values().any(|p| entry_mentions(p, marker)),
        _ => false,
    }
}

/// Runs all checks in order; fatal outcomes abort, warnings accumulate.
pub struct SanityChecker {
    checks: Vec<Box<dyn ConfigCheck>>,
}

impl SanityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(
        &self,
        config: &Value,
        resolved: &ResolvedFeatures,
    ) -> Result<Vec<Warning>, GenerateError> {
        let mut warnings = Vec::new();
        for check in &self.checks {
            match check.check(config, resolved) {
                CheckOutcome::Pass => {}
                CheckOutcome::Warn(w) => warnings.push(w),
                CheckOutcome::Fail(e) => return Err(e),
            }
        }
        Ok(warnings)
    }
}

impl Default for SanityChecker {
    fn default() -> Self {
        Self {
            checks: vec![
                Box::new(EntryPresent),
                Box::new(OutputPresent),
                Box::new(PolyfillInEntry),
            ],
        }
    }
}
