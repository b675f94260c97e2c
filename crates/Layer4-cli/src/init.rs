//! `sashimono init`
//!
//! Writes the project's `.sashimono/config.json` with every default spelled
//! out, so it can be edited in place.

use sashimono_foundation::config::{
    DEFAULT_ARCHIVE_EXTENSION, DEFAULT_CURRENT_GOAL, DEFAULT_HOST_COMMAND, DEFAULT_OUTPUT_DIR,
};
use sashimono_foundation::{BuildConfig, JsonStore, BUILD_CONFIG_FILE};
use std::path::Path;

fn default_config() -> BuildConfig {
    let mut config = BuildConfig::new()
        .with_output_dir(DEFAULT_OUTPUT_DIR)
        .with_archive_extension(DEFAULT_ARCHIVE_EXTENSION)
        .with_host_command(DEFAULT_HOST_COMMAND)
        .with_parallel_reads(true);
    config.current_goal = Some(DEFAULT_CURRENT_GOAL.to_string());
    config
}

/// Initialize Sashimono configuration under `root`
pub fn init_project(root: &Path, force: bool) -> anyhow::Result<()> {
    let store = JsonStore::project(root);

    if store.exists(BUILD_CONFIG_FILE) && !force {
        println!("Sashimono already initialized in {}.", root.display());
        println!("  Use --force to reinitialize.");
        return Ok(());
    }

    default_config().save_project(root)?;
    println!("Created {}", store.file_path(BUILD_CONFIG_FILE).display());
    Ok(())
}
