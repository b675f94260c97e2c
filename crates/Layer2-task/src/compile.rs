//! Compile stage results
//!
//! Compilation itself happens outside the bridge. What downstream tasks need
//! from it is the classes directory, published as a `CompileResult`.

use crate::store::{TaskResult, TaskResultStore};
use crate::task::Task;
use sashimono_foundation::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output of the compile stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub classes_directory: PathBuf,
}

impl CompileResult {
    pub fn new(classes_directory: impl Into<PathBuf>) -> Self {
        Self {
            classes_directory: classes_directory.into(),
        }
    }

    pub fn classes_directory(&self) -> &Path {
        &self.classes_directory
    }
}

impl TaskResult for CompileResult {
    const KIND: &'static str = "CompileResult";
}

/// Publishes a classes directory the host already compiled
#[derive(Debug, Clone)]
pub struct ClassesDirectoryTask {
    dir: PathBuf,
}

impl ClassesDirectoryTask {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Task for ClassesDirectoryTask {
    type Output = CompileResult;

    fn name(&self) -> &str {
        "classes"
    }

    fn execute(&self, _results: &TaskResultStore) -> Result<CompileResult> {
        if !self.dir.is_dir() {
            return Err(Error::InvalidInput(format!(
                "classes directory {} does not exist",
                self.dir.display()
            )));
        }
        debug!("Using classes directory {}", self.dir.display());
        Ok(CompileResult::new(&self.dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_directory_is_published() {
        let dir = TempDir::new().unwrap();
        let task = ClassesDirectoryTask::new(dir.path());
        let result = task.execute(&TaskResultStore::new()).unwrap();
        assert_eq!(result.classes_directory(), dir.path());
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let task = ClassesDirectoryTask::new(dir.path().join("absent"));
        let err = task.execute(&TaskResultStore::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
