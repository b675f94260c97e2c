//! Packaging
//!
//! - `archive` - deterministic zip writing (sorted entries, pinned metadata)
//! - `jar` - `JarTask`, the packaging step of the pipeline

pub mod archive;
mod jar;

pub use archive::{collect_entries, ArchiveEntry, ENTRY_PERMISSIONS};
pub use jar::{JarResult, JarTask};
