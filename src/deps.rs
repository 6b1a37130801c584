//! Dependency validation
//!
//! Whether a package is installed is an external concern, abstracted behind
//! [`DependencyProbe`] so the generation pipeline stays a pure function of
//! its inputs plus two read-only existence checks. The default probe looks
//! in the project's `node_modules`.

use crate::error::GenerateError;
use crate::features::{FeatureKind, FeatureRegistry};
use crate::resolve::ResolvedFeatures;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only view of the project the config is generated for.
pub trait DependencyProbe {
    /// Whether `package` is installed and resolvable.
    fn is_installed(&self, package: &str) -> bool;

    /// Whether a file exists at `relative` under the project root.
    fn project_file_exists(&self, relative: &Path) -> bool;
}

/// Probe backed by the project directory on disk.
#[derive(Debug, Clone)]
pub struct NodeModulesProbe {
    project_root: PathBuf,
}

impl NodeModulesProbe {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }
}

impl DependencyProbe for NodeModulesProbe {
    fn is_installed(&self, package: &str) -> bool {
        self.project_root
            .join("node_modules")
            .join(package)
            .is_dir()
    }

    fn project_file_exists(&self, relative: &Path) -> bool {
        self.project_root.join(relative).is_file()
    }
}

/// Checks that every required package is installed and that typescript,
/// when enabled, has its project file.
///
/// Missing packages fail with a single [`GenerateError::MissingDependencies`]
/// enumerating all of them, so the user fixes everything in one install run.
pub fn validate_dependencies(
    registry: &FeatureRegistry,
    resolved: &ResolvedFeatures,
    probe: &dyn DependencyProbe,
) -> Result<(), GenerateError> {
    let required = resolved.required_dependencies(registry);
    let missing: Vec<String> = required
        .into_iter()
        .filter(|dep| !probe.is_installed(dep))
        .collect();

    if !missing.is_empty() {
        return Err(GenerateError::MissingDependencies { missing });
    }

    if resolved.is_enabled(FeatureKind::Typescript)
        && !probe.project_file_exists(Path::new("tsconfig.json"))
    {
        return Err(GenerateError::MissingTsConfig);
    }

    debug!("all required dependencies present");
    Ok(())
}
