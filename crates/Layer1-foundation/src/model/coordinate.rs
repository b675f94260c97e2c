//! Coordinate - artifact identity
//!
//! A `group:artifact:version` triple. The colon form is also the wire form of
//! the manifest, and it is NOT escaped: a segment that itself contains `:`
//! cannot be represented. Existing manifest consumers split on `:`, so the
//! format is kept as is and such coordinates are rejected on parse instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Separator between coordinate segments
pub const COORDINATE_DELIMITER: char = ':';

/// Immutable artifact identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Group split on `.`, the directory segments of a repository layout
    pub fn group_segments(&self) -> impl Iterator<Item = &str> {
        self.group.split('.').filter(|s| !s.is_empty())
    }

    /// `root/<group segments>/<artifact>/<version>`
    pub fn repository_dir(&self, root: &Path) -> PathBuf {
        let mut dir = root.to_path_buf();
        for segment in self.group_segments() {
            dir.push(segment);
        }
        dir.push(&self.artifact);
        dir.push(&self.version);
        dir
    }

    /// `<artifact>-<version>.<ext>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}-{}.{}", self.artifact, self.version, extension)
    }

    /// Full local-repository path of the artifact file
    pub fn repository_path(&self, root: &Path, extension: &str) -> PathBuf {
        self.repository_dir(root).join(self.file_name(extension))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.group,
            self.artifact,
            self.version,
            d = COORDINATE_DELIMITER
        )
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(COORDINATE_DELIMITER).collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(Error::InvalidInput(format!(
                "expected group:artifact:version, got `{}`",
                s
            ))),
        }
    }
}
