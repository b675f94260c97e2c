//! Config - bridge settings
//!
//! - `build.rs` - BuildConfig (output root, archive extension, host command)

mod build;

pub use build::{
    BuildConfig, BUILD_CONFIG_FILE, DEFAULT_ARCHIVE_EXTENSION, DEFAULT_CURRENT_GOAL,
    DEFAULT_HOST_COMMAND, DEFAULT_OUTPUT_DIR,
};
