//! Build Config - bridge settings
//!
//! Loaded from the global store first, then overlaid by the project store.
//! Every field is optional on disk; the accessors supply the defaults.

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file name inside a store
pub const BUILD_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_OUTPUT_DIR: &str = "target/sashimono-repository";
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "jar";
pub const DEFAULT_HOST_COMMAND: &str = "mvn";
pub const DEFAULT_CURRENT_GOAL: &str = "sashimono:generate";

/// Sashimono bridge settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Local repository root for packaged artifacts, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Extension of the packaged archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_extension: Option<String>,

    /// Host build command named in corrective messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_command: Option<String>,

    /// Read archive entries in parallel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_reads: Option<bool>,

    /// Goal under which the bridge itself is invoked by the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_goal: Option<String>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// Global settings overlaid with the settings of `project_root`
    pub fn load(project_root: &Path) -> Result<Self> {
        let mut config = Self::new();

        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<BuildConfig>(BUILD_CONFIG_FILE)? {
                debug!("Loaded global config from {}", global.base_dir().display());
                config.merge(global_config);
            }
        }

        config.merge(Self::load_project(project_root)?);
        Ok(config)
    }

    pub fn load_project(project_root: &Path) -> Result<Self> {
        let store = JsonStore::project(project_root);
        let config = store.load_optional::<BuildConfig>(BUILD_CONFIG_FILE)?;
        if config.is_some() {
            debug!("Loaded project config from {}", store.base_dir().display());
        }
        Ok(config.unwrap_or_default())
    }

    pub fn save_project(&self, project_root: &Path) -> Result<()> {
        JsonStore::project(project_root).save(BUILD_CONFIG_FILE, self)
    }

    /// Overlay `other` (other wins where set)
    pub fn merge(&mut self, other: BuildConfig) {
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.archive_extension.is_some() {
            self.archive_extension = other.archive_extension;
        }
        if other.host_command.is_some() {
            self.host_command = other.host_command;
        }
        if other.parallel_reads.is_some() {
            self.parallel_reads = other.parallel_reads;
        }
        if other.current_goal.is_some() {
            self.current_goal = other.current_goal;
        }
    }

    // ========================================================================
    // Resolved values
    // ========================================================================

    /// Output root, resolved against `project_root` when relative
    pub fn output_root(&self, project_root: &Path) -> PathBuf {
        let dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        if dir.is_absolute() {
            dir
        } else {
            project_root.join(dir)
        }
    }

    pub fn archive_extension(&self) -> &str {
        self.archive_extension
            .as_deref()
            .unwrap_or(DEFAULT_ARCHIVE_EXTENSION)
    }

    pub fn host_command(&self) -> &str {
        self.host_command.as_deref().unwrap_or(DEFAULT_HOST_COMMAND)
    }

    pub fn parallel_reads(&self) -> bool {
        self.parallel_reads.unwrap_or(true)
    }

    pub fn current_goal(&self) -> &str {
        self.current_goal.as_deref().unwrap_or(DEFAULT_CURRENT_GOAL)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_archive_extension(mut self, ext: impl Into<String>) -> Self {
        self.archive_extension = Some(ext.into());
        self
    }

    pub fn with_host_command(mut self, command: impl Into<String>) -> Self {
        self.host_command = Some(command.into());
        self
    }

    pub fn with_parallel_reads(mut self, parallel: bool) -> Self {
        self.parallel_reads = Some(parallel);
        self
    }
}
