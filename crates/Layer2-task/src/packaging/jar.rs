//! Jar task - packages the compiled classes into a reproducible archive

use super::archive::{collect_entries, read_contents, write_archive};
use crate::compile::CompileResult;
use crate::store::{TaskResult, TaskResultStore};
use crate::task::Task;
use sashimono_foundation::storage::atomic;
use sashimono_foundation::{Coordinate, Error, ResolvedDependency, Result, JAR};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Output of packaging: the archive as a resolvable dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarResult {
    pub dependency: ResolvedDependency,
}

impl JarResult {
    pub fn new(dependency: ResolvedDependency) -> Self {
        Self { dependency }
    }

    pub fn path(&self) -> &Path {
        &self.dependency.artifact_path
    }
}

impl TaskResult for JarResult {
    const KIND: &'static str = "JarResult";
}

/// Packages the primary `CompileResult` into
/// `<output root>/<group path>/<artifact>/<version>/<artifact>-<version>.<ext>`
#[derive(Debug, Clone)]
pub struct JarTask {
    output_root: PathBuf,
    coordinate: Coordinate,
    extension: String,
    parallel_reads: bool,
}

impl JarTask {
    pub fn new(output_root: impl Into<PathBuf>, coordinate: Coordinate) -> Self {
        Self {
            output_root: output_root.into(),
            coordinate,
            extension: JAR.to_string(),
            parallel_reads: true,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_parallel_reads(mut self, parallel: bool) -> Self {
        self.parallel_reads = parallel;
        self
    }

    /// Where the archive will be written
    pub fn target_path(&self) -> PathBuf {
        self.coordinate
            .repository_path(&self.output_root, &self.extension)
    }

    /// Write the archive of `classes` into `temp`
    fn fill(&self, classes: &Path, temp: &mut NamedTempFile) -> io::Result<usize> {
        let entries = collect_entries(classes)?;
        let contents = read_contents(&entries, self.parallel_reads)?;
        let mut writer = write_archive(BufWriter::new(temp.as_file_mut()), &entries, &contents)?;
        writer.flush()?;
        Ok(entries.len())
    }
}

impl Task for JarTask {
    type Output = JarResult;

    fn name(&self) -> &str {
        "jar"
    }

    fn execute(&self, results: &TaskResultStore) -> Result<JarResult> {
        let compiled = results.first::<CompileResult>()?;
        let target = self.target_path();
        let parent = self.coordinate.repository_dir(&self.output_root);

        std::fs::create_dir_all(&parent).map_err(|e| Error::packaging_failed(&parent, e))?;

        // The temporary file is deleted on drop, so any early return below
        // leaves nothing at (or next to) the target.
        let mut temp = atomic::temp_file_for(&target).map_err(|e| Error::packaging_failed(&target, e))?;
        let count = self
            .fill(compiled.classes_directory(), &mut temp)
            .map_err(|e| Error::packaging_failed(&target, e))?;
        atomic::persist(temp, &target).map_err(|e| Error::packaging_failed(&target, e))?;

        info!(
            "Packaged {} entries from {} into {}",
            count,
            compiled.classes_directory().display(),
            target.display()
        );

        Ok(JarResult::new(ResolvedDependency::new(
            self.coordinate.clone(),
            self.extension.clone(),
            target,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_target_path_layout() {
        let task = JarTask::new("/repo", Coordinate::new("com.example", "app", "1.0"));
        assert_eq!(
            task.target_path(),
            PathBuf::from("/repo/com/example/app/1.0/app-1.0.jar")
        );

        let war = task.with_extension("war");
        assert!(war.target_path().ends_with("app-1.0.war"));
    }

    #[test]
    fn test_missing_compile_result() {
        let out = TempDir::new().unwrap();
        let task = JarTask::new(out.path(), Coordinate::new("g", "a", "1"));
        let err = task.execute(&TaskResultStore::new()).unwrap_err();
        assert!(matches!(err, Error::MissingResult { ref kind } if kind == "CompileResult"));
        assert!(!task.target_path().exists());
    }

    #[test]
    fn test_unreadable_classes_leave_no_archive() {
        let out = TempDir::new().unwrap();
        let mut results = TaskResultStore::new();
        results
            .put(CompileResult::new(out.path().join("no-such-classes")))
            .unwrap();

        let task = JarTask::new(out.path().join("repo"), Coordinate::new("g", "a", "1"));
        let err = task.execute(&results).unwrap_err();
        assert!(matches!(err, Error::PackagingFailed { .. }));

        let version_dir = task.target_path().parent().unwrap().to_path_buf();
        assert!(!task.target_path().exists());
        assert_eq!(std::fs::read_dir(version_dir).unwrap().count(), 0);
    }
}
