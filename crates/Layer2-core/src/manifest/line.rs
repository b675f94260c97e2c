//! Manifest records and their text form

use super::{ARTIFACT, FILTERED_RESOURCES, MODULE, PACKAGING, REQUIRE, SOURCE};
use sashimono_foundation::{Coordinate, Error, Result};
use std::fmt;
use std::path::Path;

/// One tagged manifest record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    Artifact(Coordinate),
    Packaging(String),
    Module(String),
    Require(Coordinate),
    FilteredResources(bool),
    Source(String),
}

impl ManifestLine {
    pub fn tag(&self) -> &'static str {
        match self {
            ManifestLine::Artifact(_) => ARTIFACT,
            ManifestLine::Packaging(_) => PACKAGING,
            ManifestLine::Module(_) => MODULE,
            ManifestLine::Require(_) => REQUIRE,
            ManifestLine::FilteredResources(_) => FILTERED_RESOURCES,
            ManifestLine::Source(_) => SOURCE,
        }
    }

    /// Parse a single line (without its terminator)
    pub fn parse(line: &str) -> Result<Self> {
        let (tag, value) = line
            .split_once(' ')
            .ok_or_else(|| Error::InvalidInput(format!("manifest line without value: `{}`", line)))?;

        let parsed = match tag {
            ARTIFACT => ManifestLine::Artifact(value.parse()?),
            PACKAGING => ManifestLine::Packaging(value.to_string()),
            MODULE => ManifestLine::Module(value.to_string()),
            REQUIRE => ManifestLine::Require(value.parse()?),
            FILTERED_RESOURCES => match value {
                "true" => ManifestLine::FilteredResources(true),
                "false" => ManifestLine::FilteredResources(false),
                other => {
                    return Err(Error::InvalidInput(format!(
                        "{} must be true or false, got `{}`",
                        FILTERED_RESOURCES, other
                    )))
                }
            },
            SOURCE => ManifestLine::Source(value.to_string()),
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown manifest tag `{}`",
                    other
                )))
            }
        };
        Ok(parsed)
    }
}

impl fmt::Display for ManifestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.tag())?;
        match self {
            ManifestLine::Artifact(c) | ManifestLine::Require(c) => write!(f, "{}", c),
            ManifestLine::Packaging(v) | ManifestLine::Module(v) | ManifestLine::Source(v) => {
                f.write_str(v)
            }
            ManifestLine::FilteredResources(b) => write!(f, "{}", b),
        }
    }
}

/// A complete manifest, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    lines: Vec<ManifestLine>,
}

impl Manifest {
    pub fn new(lines: Vec<ManifestLine>) -> Self {
        Self { lines }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let lines = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(ManifestLine::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { lines })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Text form, every line terminated by `\n`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    pub fn lines(&self) -> &[ManifestLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // ========================================================================
    // Typed views
    // ========================================================================

    pub fn artifact(&self) -> Option<&Coordinate> {
        self.lines.iter().find_map(|l| match l {
            ManifestLine::Artifact(c) => Some(c),
            _ => None,
        })
    }

    pub fn packaging(&self) -> Option<&str> {
        self.lines.iter().find_map(|l| match l {
            ManifestLine::Packaging(p) => Some(p.as_str()),
            _ => None,
        })
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            ManifestLine::Module(m) => Some(m.as_str()),
            _ => None,
        })
    }

    pub fn requires(&self) -> impl Iterator<Item = &Coordinate> {
        self.lines.iter().filter_map(|l| match l {
            ManifestLine::Require(c) => Some(c),
            _ => None,
        })
    }

    /// Absent means the manifest predates the flag; treat as unfiltered
    pub fn filtered_resources(&self) -> bool {
        self.lines
            .iter()
            .any(|l| matches!(l, ManifestLine::FilteredResources(true)))
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            ManifestLine::Source(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
