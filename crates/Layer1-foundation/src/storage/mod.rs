//! Storage module for Sashimono
//!
//! - `atomic`: temp-file-then-rename replacement of output files
//! - `json`: JSON - settings and host-supplied project descriptions

pub mod atomic;
mod json;

pub use atomic::atomic_write;
pub use json::{load_json, JsonStore, SASHIMONO_DIR};
