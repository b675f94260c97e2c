//! Dependency manifest
//!
//! A line-oriented snapshot of a resolved project, written for a downstream
//! builder that must not re-resolve anything:
//!
//! ```text
//! artifact com.example:app:1.0
//! packaging jar
//! module core
//! require g:a:1
//! filtered_resources false
//! source src/main/java
//! ```
//!
//! Every line is `TAG SP VALUE LF`. The file lives at
//! `<project root>/.sashimono/dependencies.list` and is always rewritten in
//! full.

mod line;
mod projector;

pub use line::{Manifest, ManifestLine};
pub use projector::{ManifestProjector, ManifestReport};

use sashimono_foundation::SASHIMONO_DIR;
use std::path::{Path, PathBuf};

/// Manifest file name inside the project's `.sashimono` directory
pub const DEPENDENCIES_LIST: &str = "dependencies.list";

pub const ARTIFACT: &str = "artifact";
pub const PACKAGING: &str = "packaging";
pub const MODULE: &str = "module";
pub const REQUIRE: &str = "require";
pub const FILTERED_RESOURCES: &str = "filtered_resources";
pub const SOURCE: &str = "source";

/// `<project_root>/.sashimono/dependencies.list`
pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(SASHIMONO_DIR).join(DEPENDENCIES_LIST)
}
