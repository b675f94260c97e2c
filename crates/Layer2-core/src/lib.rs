//! # sashimono-core
//!
//! Layer2 - project-level operations of the bridge
//!
//! - `project`: the resolved project model handed over by the host
//! - `manifest`: dependency manifest projection and reading
//! - `lifecycle`: readiness checks against the host's goal sequence
//! - `bridge`: the `generate` flow tying the three together
//!
//! ```ignore
//! use sashimono_core::{Bridge, ProjectModel};
//!
//! let model = ProjectModel::load(Path::new("project.json"))?;
//! let report = Bridge::new(config).generate(&model, &goals, false, || Ok(model.dependencies.clone()))?;
//! println!("{}", report.path.display());
//! ```

pub mod bridge;
pub mod lifecycle;
pub mod manifest;
pub mod project;

// ============================================================================
// Re-exports
// ============================================================================
pub use bridge::Bridge;
pub use lifecycle::{resolve_goals, PhaseGate, IGNORED_PHASES, REQUIRED_PHASES};
pub use manifest::{manifest_path, Manifest, ManifestLine, ManifestProjector, ManifestReport};
pub use project::{ProjectModel, PLUGIN_PACKAGING};
