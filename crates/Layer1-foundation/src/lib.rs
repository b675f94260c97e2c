//! # sashimono-foundation
//!
//! Foundation layer for Sashimono:
//! - Error: the fatal error kinds of a build invocation
//! - Model: coordinates, scopes, resolved dependencies
//! - Storage: JSON stores and atomic file replacement
//! - Config: bridge settings (global + project)

pub mod config;
pub mod error;
pub mod model;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Model
// ============================================================================
pub use model::{Coordinate, Dependency, ResolvedDependency, Scope, COORDINATE_DELIMITER, JAR};

// ============================================================================
// Config
// ============================================================================
pub use config::{BuildConfig, BUILD_CONFIG_FILE};

// ============================================================================
// Storage
// ============================================================================
pub use storage::{atomic_write, load_json, JsonStore, SASHIMONO_DIR};
