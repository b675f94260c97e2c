//! Model - coordinates and dependencies
//!
//! - `coordinate.rs` - `group:artifact:version` identity and repository layout
//! - `dependency.rs` - scoped and resolved dependencies

mod coordinate;
mod dependency;

pub use coordinate::{Coordinate, COORDINATE_DELIMITER};
pub use dependency::{Dependency, ResolvedDependency, Scope, JAR};
