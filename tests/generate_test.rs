//! End-to-end generation tests
//!
//! Exercises the full pipeline against a stub probe: feature resolution,
//! dependency validation, rule composition, merging and sanity checks.

use bundlerig::deps::DependencyProbe;
use bundlerig::error::{GenerateError, Warning};
use bundlerig::features::{FeatureRegistry, FeatureSelection};
use bundlerig::generate::generate;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Probe with an explicit set of installed packages and project files.
struct StubProbe {
    installed: HashSet<String>,
    files: HashSet<PathBuf>,
}

impl StubProbe {
    /// Everything any feature could need is installed; no project files.
    fn fully_installed() -> Self {
        let registry = FeatureRegistry::with_defaults();
        let installed = registry
            .iter()
            .flat_map(|d| d.dependencies.iter())
            .chain(bundlerig::resolve::ESSENTIAL_DEPS.iter())
            .map(|s| (*s).to_string())
            .collect();
        Self {
            installed,
            files: HashSet::new(),
        }
    }

    fn with_file(mut self, path: &str) -> Self {
        self.files.insert(PathBuf::from(path));
        self
    }

    fn without_package(mut self, package: &str) -> Self {
        self.installed.remove(package);
        self
    }
}

impl DependencyProbe for StubProbe {
    fn is_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }

    fn project_file_exists(&self, relative: &Path) -> bool {
        self.files.contains(relative)
    }
}

fn selection(value: Value) -> FeatureSelection {
    FeatureSelection::from_value(value).unwrap()
}

fn overrides() -> Value {
    json!({
        "entry": "./src/index.js",
        "output": {"path": "dist", "filename": "bundle.js"}
    })
}

// Scenario A: typescript enabled, no tsconfig.json
#[test]
fn test_typescript_without_tsconfig_fails() {
    let err = generate(
        &selection(json!({"typescript": true})),
        overrides(),
        &StubProbe::fully_installed(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::MissingTsConfig));
}

#[test]
fn test_typescript_with_tsconfig_succeeds() {
    let generated = generate(
        &selection(json!({"typescript": true})),
        overrides(),
        &StubProbe::fully_installed().with_file("tsconfig.json"),
    )
    .unwrap();
    assert!(generated.warnings.is_empty());
}

// Scenario B: empty selection, valid entry/output
#[test]
fn test_all_defaults_generate_valid_config() {
    let generated = generate(
        &selection(json!({})),
        overrides(),
        &StubProbe::fully_installed(),
    )
    .unwrap();

    assert!(!generated.config["entry"].is_null());
    assert!(!generated.config["output"].is_null());
    assert!(generated.warnings.is_empty());

    // default-enabled media wraps the composed rules in a selector
    let arms = generated.config["module"]["rules"][0]["oneOf"]
        .as_array()
        .unwrap();
    assert!(arms.len() >= 3); // image + script + style + file
}

// Scenario C: media disabled, two distinct categories contributing
#[test]
fn test_media_disabled_yields_flat_rule_list() {
    let generated = generate(
        &selection(json!({"media": false})),
        overrides(),
        &StubProbe::fully_installed(),
    )
    .unwrap();

    let rules = generated.config["module"]["rules"].as_array().unwrap();
    // babel (script) and css (style) are the default contributors
    assert_eq!(rules.len(), 2);
    assert!(rules.iter().all(|r| r.get("oneOf").is_none()));
    assert_eq!(rules[0]["use"][0]["loader"], "babel-loader");
    assert_eq!(rules[1]["use"], json!(["style-loader", "css-loader"]));
}

// Scenario D: media enabled (default), one category contributing
#[test]
fn test_media_enabled_wraps_in_one_of_with_file_last() {
    let generated = generate(
        &selection(json!({"css": false, "media": {"loadImgWithUrlLoader": false}})),
        overrides(),
        &StubProbe::fully_installed(),
    )
    .unwrap();

    let rules = generated.config["module"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    let arms = rules[0]["oneOf"].as_array().unwrap();
    assert_eq!(arms.len(), 2); // script rule + file catch-all
    assert_eq!(arms[0]["use"][0]["loader"], "babel-loader");
    assert_eq!(arms[1]["loader"], "file-loader");
}

// Scenario E: polyfill enabled, marker absent from entry
#[test]
fn test_polyfill_without_entry_marker_warns_but_succeeds() {
    let generated = generate(
        &selection(json!({"polyfill": true})),
        overrides(),
        &StubProbe::fully_installed(),
    )
    .unwrap();
    assert_eq!(generated.warnings, [Warning::PolyfillMissing]);
}

#[test]
fn test_polyfill_in_entry_list_satisfies_check() {
    let generated = generate(
        &selection(json!({"polyfill": true})),
        json!({
            "entry": ["babel-polyfill", "./src/index.js"],
            "output": {"path": "dist"}
        }),
        &StubProbe::fully_installed(),
    )
    .unwrap();
    assert!(generated.warnings.is_empty());
}

// Scenario F: unknown feature fails before any dependency check
#[test]
fn test_unknown_feature_fails_before_dependency_check() {
    // nothing is installed, so a dependency check would also fail; the
    // unknown name must win
    let empty_probe = StubProbe {
        installed: HashSet::new(),
        files: HashSet::new(),
    };
    let err = generate(
        &selection(json!({"doesNotExist": true})),
        overrides(),
        &empty_probe,
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::UnknownFeature(name) if name == "doesNotExist"));
}

#[test]
fn test_missing_packages_reported_with_install_hint() {
    let err = generate(
        &selection(json!({})),
        overrides(),
        &StubProbe::fully_installed().without_package("css-loader"),
    )
    .unwrap_err();

    match &err {
        GenerateError::MissingDependencies { missing } => {
            assert_eq!(missing, &["css-loader"]);
        }
        other => panic!("expected MissingDependencies, got {other:?}"),
    }
    assert!(err.to_string().contains("yarn add css-loader --dev"));
}

#[test]
fn test_missing_entry_rejected_before_returning_config() {
    let err = generate(
        &selection(json!({})),
        json!({"output": {"path": "dist"}}),
        &StubProbe::fully_installed(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::MissingEntry));
}

#[test]
fn test_missing_output_rejected_before_returning_config() {
    let err = generate(
        &selection(json!({})),
        json!({"entry": "./src/index.js"}),
        &StubProbe::fully_installed(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::MissingOutput));
}

#[test]
fn test_catch_all_is_last_for_every_feature_combination() {
    let combinations = [
        json!({}),
        json!({"typescript": true}),
        json!({"sass": true, "postcss": true}),
        json!({"css": false, "babel": false}),
        json!({"react": true, "polyfill": true}),
    ];
    let probe = StubProbe::fully_installed().with_file("tsconfig.json");

    for combo in combinations {
        let generated = generate(&selection(combo.clone()), overrides(), &probe).unwrap();
        let arms = generated.config["module"]["rules"][0]["oneOf"]
            .as_array()
            .unwrap();
        let last = arms.last().unwrap();
        assert_eq!(last["loader"], "file-loader", "combination {combo}");
    }
}

#[test]
fn test_generation_is_deterministic() {
    let sel = selection(json!({"typescript": true, "sass": true, "compress": true}));
    let probe = StubProbe::fully_installed().with_file("tsconfig.json");

    let a = generate(&sel, overrides(), &probe).unwrap();
    let b = generate(&sel, overrides(), &probe).unwrap();
    assert_eq!(
        serde_json::to_string(&a.config).unwrap(),
        serde_json::to_string(&b.config).unwrap()
    );
}

#[test]
fn test_user_override_arrays_concatenate() {
    let generated = generate(
        &selection(json!({"media": false, "css": false, "babel": false})),
        json!({
            "entry": "./src/index.js",
            "output": {"path": "dist"},
            "module": {"rules": [{"test": "\\.txt$", "use": "raw-loader"}]}
        }),
        &StubProbe::fully_installed(),
    )
    .unwrap();

    // no feature rules remain, so the user's rule is the whole list
    let rules = generated.config["module"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["use"], "raw-loader");
}
