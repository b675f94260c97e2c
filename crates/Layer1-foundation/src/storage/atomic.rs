//! Atomic file replacement
//!
//! Content is written to a temporary file in the destination directory and
//! renamed over the target. Readers see either the previous file or the new
//! one, never a prefix of it. If anything fails the temporary file is
//! removed when it is dropped.
//!
//! Temporary files start out owner-only; the replacement is given
//! [`OUTPUT_FILE_MODE`] before the rename so other users and processes can
//! read the published file.

use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Unix mode of every file published through this module
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Directory a target file lives in (`.` for bare file names)
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Create a temporary file next to `target`, ready to be persisted over it
pub fn temp_file_for(target: &Path) -> io::Result<NamedTempFile> {
    let dir = parent_dir(target);
    std::fs::create_dir_all(dir)?;
    let temp = tempfile::Builder::new()
        .prefix(".sashimono-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    set_output_mode(temp.as_file())?;
    Ok(temp)
}

#[cfg(unix)]
fn set_output_mode(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(OUTPUT_FILE_MODE))
}

#[cfg(not(unix))]
fn set_output_mode(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}

/// Rename a finished temporary file over `target`
pub fn persist(temp: NamedTempFile, target: &Path) -> io::Result<()> {
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|e| e.error)?;
    debug!("Replaced {}", target.display());
    Ok(())
}

/// Replace `target` with `contents` atomically
pub fn atomic_write(target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut temp = temp_file_for(target)?;
    temp.write_all(contents)?;
    temp.flush()?;
    persist(temp, target)
}
