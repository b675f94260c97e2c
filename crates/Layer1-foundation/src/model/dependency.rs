//! Dependency types shared by the packaging and manifest layers

use super::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Packaging kind of a plain class archive
pub const JAR: &str = "jar";

/// Dependency scope as declared to the host build system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }

    /// Visible on the compile class path of the depending project
    pub fn is_compile_visible(&self) -> bool {
        matches!(self, Scope::Compile | Scope::Provided)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency of the project, as the host resolved it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    #[serde(default)]
    pub scope: Scope,
}

impl Dependency {
    pub fn new(coordinate: Coordinate, scope: Scope) -> Self {
        Self { coordinate, scope }
    }

    pub fn compile(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Scope::Compile)
    }
}

/// An artifact that exists on disk and can be looked up by coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub coordinate: Coordinate,
    pub packaging_kind: String,
    pub artifact_path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl ResolvedDependency {
    pub fn new(
        coordinate: Coordinate,
        packaging_kind: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            coordinate,
            packaging_kind: packaging_kind.into(),
            artifact_path: artifact_path.into(),
            classifier: None,
        }
    }
}
