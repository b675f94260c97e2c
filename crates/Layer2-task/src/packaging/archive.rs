//! Reproducible archive writing
//!
//! Two runs over byte-identical inputs must produce byte-identical archives.
//! The sources of drift in a zip file are entry order, timestamps and
//! permissions, so all three are pinned:
//! - entries are sorted by entry name (byte order), never by walk or
//!   completion order
//! - every entry carries the zip epoch, 1980-01-01 00:00:00, which is the
//!   zero value of the DOS timestamp the format stores
//! - every entry carries mode 0644
//!
//! Entry names are relative to the archived root and always use `/`.

use rayon::prelude::*;
use std::fs;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Unix mode recorded for every entry
pub const ENTRY_PERMISSIONS: u32 = 0o644;

/// Timestamp recorded for every entry
pub fn entry_timestamp() -> DateTime {
    DateTime::default()
}

/// One file to be stored in an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name inside the archive (`pkg/B.class`)
    pub name: String,
    /// File on disk
    pub source: PathBuf,
}

/// `/`-joined form of a relative path
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Every regular file under `root`, sorted by entry name
pub fn collect_entries(root: &Path) -> io::Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    for item in WalkDir::new(root).follow_links(false) {
        let item = item.map_err(io::Error::from)?;
        if !item.file_type().is_file() {
            continue;
        }
        let relative = item
            .path()
            .strip_prefix(root)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        entries.push(ArchiveEntry {
            name: entry_name(relative),
            source: item.path().to_path_buf(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Contents of `entries`, index-aligned with them
pub fn read_contents(entries: &[ArchiveEntry], parallel: bool) -> io::Result<Vec<Vec<u8>>> {
    if parallel {
        entries.par_iter().map(|e| fs::read(&e.source)).collect()
    } else {
        entries.iter().map(|e| fs::read(&e.source)).collect()
    }
}

/// Write `entries` (with their `contents`) as a zip archive into `writer`
pub fn write_archive<W: Write + Seek>(
    writer: W,
    entries: &[ArchiveEntry],
    contents: &[Vec<u8>],
) -> io::Result<W> {
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(entry_timestamp())
        .unix_permissions(ENTRY_PERMISSIONS);

    let mut zip = ZipWriter::new(writer);
    for (entry, bytes) in entries.iter().zip(contents) {
        debug!("Adding {} ({} bytes)", entry.name, bytes.len());
        zip.start_file(entry.name.as_str(), options)
            .map_err(io::Error::from)?;
        zip.write_all(bytes)?;
    }
    zip.finish().map_err(io::Error::from)
}
