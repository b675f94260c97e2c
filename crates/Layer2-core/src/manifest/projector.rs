//! Manifest projector - renders a project model into the manifest file

use super::{manifest_path, Manifest, ManifestLine};
use crate::project::ProjectModel;
use sashimono_foundation::{atomic_write, Dependency, Error, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// What a projection wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestReport {
    pub path: PathBuf,
    pub manifest: Manifest,
    /// Dependencies that produced a `require` line
    pub required: usize,
    /// Dependencies left out because of their scope
    pub skipped: usize,
}

/// Projects a resolved project into `<root>/.sashimono/dependencies.list`
#[derive(Debug, Clone, Default)]
pub struct ManifestProjector;

impl ManifestProjector {
    pub fn new() -> Self {
        Self
    }

    /// Build the manifest for `model` without touching the filesystem
    ///
    /// Order: artifact, packaging, modules, requires, filtered_resources,
    /// sources. Only compile and provided dependencies are required.
    pub fn render(
        &self,
        model: &ProjectModel,
        resources_filtered: bool,
        dependencies: &[Dependency],
    ) -> Manifest {
        let mut lines = vec![
            ManifestLine::Artifact(model.coordinate.clone()),
            ManifestLine::Packaging(model.effective_packaging().to_string()),
        ];
        lines.extend(model.modules.iter().cloned().map(ManifestLine::Module));

        for dependency in dependencies {
            if dependency.scope.is_compile_visible() {
                lines.push(ManifestLine::Require(dependency.coordinate.clone()));
            } else {
                debug!(
                    "Skipping {} dependency {}",
                    dependency.scope, dependency.coordinate
                );
            }
        }

        lines.push(ManifestLine::FilteredResources(resources_filtered));
        lines.extend(
            model
                .relative_source_roots()
                .into_iter()
                .map(ManifestLine::Source),
        );
        Manifest::new(lines)
    }

    /// Resolve dependencies through `supplier` (called exactly once), render
    /// the manifest and atomically replace the file under the project root.
    pub fn project<F>(
        &self,
        model: &ProjectModel,
        resources_filtered: bool,
        supplier: F,
    ) -> Result<ManifestReport>
    where
        F: FnOnce() -> Result<Vec<Dependency>>,
    {
        let dependencies = supplier()?;
        let manifest = self.render(model, resources_filtered, &dependencies);
        let required = manifest.requires().count();

        let path = manifest_path(&model.base_dir);
        atomic_write(&path, manifest.render().as_bytes())
            .map_err(|e| Error::manifest_write_failed(&path, e))?;

        info!(
            "Wrote {} lines ({} requires) to {}",
            manifest.len(),
            required,
            path.display()
        );

        Ok(ManifestReport {
            path,
            required,
            skipped: dependencies.len() - required,
            manifest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sashimono_foundation::{Coordinate, Scope};
    use std::cell::Cell;
    use std::path::Path;
    use tempfile::TempDir;

    fn dep(s: &str, scope: Scope) -> Dependency {
        Dependency::new(s.parse().unwrap(), scope)
    }

    fn model(root: &Path) -> ProjectModel {
        ProjectModel::new(Coordinate::new("com.example", "app", "1.0"), root)
    }

    #[test]
    fn test_only_compile_visible_scopes_required() {
        let deps = vec![
            dep("g:a:1", Scope::Compile),
            dep("g:b:2", Scope::Test),
            dep("g:c:3", Scope::Provided),
            dep("g:d:4", Scope::Runtime),
            dep("g:e:5", Scope::System),
            dep("g:f:6", Scope::Import),
        ];
        let manifest = ManifestProjector::new().render(&model(Path::new("/p")), false, &deps);
        let required: Vec<_> = manifest.requires().map(|c| c.to_string()).collect();
        assert_eq!(required, vec!["g:a:1", "g:c:3"]);
    }

    #[test]
    fn test_line_order() {
        let m = model(Path::new("/p"))
            .with_module("core")
            .with_module("web")
            .with_source_root("/p/src/main/java")
            .with_source_root("/p/src/gen");
        let text = ManifestProjector::new()
            .render(&m, true, &[dep("g:a:1", Scope::Compile)])
            .render();
        assert_eq!(
            text,
            "artifact com.example:app:1.0\n\
             packaging jar\n\
             module core\n\
             module web\n\
             require g:a:1\n\
             filtered_resources true\n\
             source src/main/java\n\
             source src/gen\n"
        );
    }

    #[test]
    fn test_supplier_called_exactly_once() {
        let dir = TempDir::new().unwrap();
        let calls = Cell::new(0);
        let report = ManifestProjector::new()
            .project(&model(dir.path()), false, || {
                calls.set(calls.get() + 1);
                Ok(vec![dep("g:a:1", Scope::Compile), dep("g:b:2", Scope::Test)])
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(report.required, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_supplier_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = ManifestProjector::new()
            .project(&model(dir.path()), false, || {
                Err(Error::InvalidInput("resolution failed".into()))
            })
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!manifest_path(dir.path()).exists());
    }

    #[test]
    fn test_unwritable_root_is_manifest_write_failed() {
        let dir = TempDir::new().unwrap();
        // A file where the .sashimono directory should go
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join(".sashimono"), "not a directory").unwrap();

        let err = ManifestProjector::new()
            .project(&model(&root), false, || Ok(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, Error::ManifestWriteFailed { .. }));
    }
}
