//! JSON file store

use crate::storage::atomic::atomic_write;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used for per-project state (`.sashimono/`)
pub const SASHIMONO_DIR: &str = ".sashimono";

/// JSON file store rooted at a directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Global settings (`<config dir>/sashimono/`)
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join("sashimono");
        Ok(Self::new(dir))
    }

    /// Project settings (`<root>/.sashimono/`)
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self::new(root.into().join(SASHIMONO_DIR))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        load_json(&self.file_path(filename))
    }

    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        if !path.exists() {
            return Ok(None);
        }
        self.load(filename).map(Some)
    }

    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<()> {
        let path = self.file_path(filename);
        let content = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Config(format!("Failed to serialize: {}", e)))?;
        atomic_write(&path, content.as_bytes())
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.file_path(filename).exists()
    }
}

/// Read and parse a JSON document from an arbitrary path
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::project(dir.path());
        let sample = Sample {
            name: "x".into(),
            count: 3,
        };

        store.save("sample.json", &sample).unwrap();
        assert!(store.exists("sample.json"));
        assert!(store.base_dir().ends_with(SASHIMONO_DIR));

        let loaded: Sample = store.load("sample.json").unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn test_load_optional_missing() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        let loaded: Option<Sample> = store.load_optional("nope.json").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let store = JsonStore::new(dir.path());
        let err = store.load::<Sample>("bad.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
