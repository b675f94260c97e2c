//! Project model - what the host build system resolved for one project
//!
//! The host hands the bridge a JSON description of the project. The model is
//! read-only after loading; nothing in the bridge writes it back.
//!
//! ```json
//! {
//!   "group": "com.example",
//!   "artifact": "app",
//!   "version": "1.0",
//!   "packaging": "jar",
//!   "modules": ["core"],
//!   "dependencies": [{ "group": "g", "artifact": "a", "version": "1", "scope": "compile" }],
//!   "sourceRoots": ["src/main/java"],
//!   "defaultGoal": "install"
//! }
//! ```

use sashimono_foundation::{load_json, Coordinate, Dependency, Result, JAR};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Packaging of a host build plugin project
pub const PLUGIN_PACKAGING: &str = "maven-plugin";

fn default_packaging() -> String {
    JAR.to_string()
}

/// Resolved project description supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectModel {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    #[serde(default = "default_packaging")]
    pub packaging: String,

    /// Submodule names, in declaration order
    #[serde(default)]
    pub modules: Vec<String>,

    /// Declared dependencies, in declaration order
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Compile source roots, absolute or relative to `base_dir`
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,

    /// Whether the resource copier filtered resources
    #[serde(default)]
    pub resources_filtered: bool,

    /// Goals to assume when the host was invoked without any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_goal: Option<String>,

    /// Project root; resolved against the model file's directory on load
    #[serde(default)]
    pub base_dir: PathBuf,
}

impl ProjectModel {
    pub fn new(coordinate: Coordinate, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            packaging: default_packaging(),
            modules: Vec::new(),
            dependencies: Vec::new(),
            source_roots: Vec::new(),
            resources_filtered: false,
            default_goal: None,
            base_dir: base_dir.into(),
        }
    }

    /// Load a model file. A missing or relative `baseDir` is taken relative
    /// to the directory holding the file; the result is always absolute so
    /// source roots can be made relative to it.
    pub fn load(path: &Path) -> Result<Self> {
        let mut model: ProjectModel = load_json(path)?;
        let file = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let file_dir = file.parent().unwrap_or_else(|| Path::new("/"));
        model.base_dir = normalize(&file_dir.join(&model.base_dir));
        debug!(
            "Loaded project {} ({}) rooted at {}",
            model.coordinate,
            model.packaging,
            model.base_dir.display()
        );
        Ok(model)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = packaging.into();
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_roots.push(root.into());
        self
    }

    pub fn with_default_goal(mut self, goal: impl Into<String>) -> Self {
        self.default_goal = Some(goal.into());
        self
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    pub fn is_plugin(&self) -> bool {
        self.packaging == PLUGIN_PACKAGING
    }

    /// Packaging as the downstream builder sees it. A plugin project builds
    /// as a plain jar; its descriptor is just another class-path resource.
    pub fn effective_packaging(&self) -> &str {
        if self.is_plugin() {
            JAR
        } else {
            &self.packaging
        }
    }

    /// Source roots relative to `base_dir`, `/`-separated
    pub fn relative_source_roots(&self) -> Vec<String> {
        self.source_roots
            .iter()
            .map(|root| portable_relative(root, &self.base_dir))
            .collect()
    }
}

/// Lexically drop `.` and resolve `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// `path` relative to `base` with `/` separators. Paths outside `base` are
/// kept as given.
fn portable_relative(path: &Path, base: &Path) -> String {
    let relative = if path.is_absolute() {
        path.strip_prefix(base).unwrap_or(path)
    } else {
        path
    };
    let parts: Vec<_> = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else if relative.has_root() {
        // Outside the project: keep the absolute path, only normalize separators
        format!("/{}", parts[1..].join("/"))
    } else {
        parts.join("/")
    }
}
