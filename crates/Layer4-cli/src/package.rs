//! `sashimono package`

use anyhow::{bail, Context};
use clap::Args;
use sashimono_core::ProjectModel;
use sashimono_foundation::{BuildConfig, Coordinate};
use sashimono_task::{ClassesDirectoryTask, JarTask, Pipeline, TaskRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Compiled classes directory
    #[arg(long)]
    pub classes: PathBuf,

    /// Coordinate of the archive (group:artifact:version)
    #[arg(long)]
    pub coordinate: Option<Coordinate>,

    /// Project model to take the coordinate and root from
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Project root (config lookup and default output location)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Repository root to package into
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Archive extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Read class files one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// What `package --json` prints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageSummary<'a> {
    invocation: String,
    coordinate: String,
    artifact_path: &'a Path,
    tasks: &'a [TaskRecord],
}

/// Coordinate and project root from the flags, falling back to the model
fn resolve_target(args: &PackageArgs) -> anyhow::Result<(Coordinate, PathBuf)> {
    let model = match &args.project {
        Some(path) => Some(
            ProjectModel::load(path)
                .with_context(|| format!("loading project model {}", path.display()))?,
        ),
        None => None,
    };

    let coordinate = match (&args.coordinate, &model) {
        (Some(c), _) => c.clone(),
        (None, Some(m)) => m.coordinate.clone(),
        (None, None) => bail!("either --coordinate or --project is required"),
    };

    let root = args
        .root
        .clone()
        .or_else(|| model.map(|m| m.base_dir))
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((coordinate, root))
}

pub fn run(args: PackageArgs) -> anyhow::Result<()> {
    let (coordinate, root) = resolve_target(&args)?;

    let mut config = BuildConfig::load(&root)?;
    if let Some(ext) = &args.extension {
        config.archive_extension = Some(ext.clone());
    }
    if args.sequential {
        config.parallel_reads = Some(false);
    }
    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_root(&root));

    let jar = JarTask::new(output_root, coordinate)
        .with_extension(config.archive_extension())
        .with_parallel_reads(config.parallel_reads());

    let mut pipeline = Pipeline::new();
    pipeline.run(&ClassesDirectoryTask::new(&args.classes))?;
    let artifact_path = pipeline.run(&jar)?.path().to_path_buf();

    if args.json {
        let summary = PackageSummary {
            invocation: pipeline.id().to_string(),
            coordinate: jar_coordinate(&pipeline),
            artifact_path: &artifact_path,
            tasks: pipeline.records(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for record in pipeline.records() {
            let elapsed = record
                .duration
                .map(|d| format!("{:.1?}", d))
                .unwrap_or_default();
            println!(
                "{} {:<8} {:<14} {}",
                record.state.symbol(),
                record.name,
                record.kind,
                elapsed
            );
        }
        println!("{}", artifact_path.display());
    }
    Ok(())
}

fn jar_coordinate(pipeline: &Pipeline) -> String {
    pipeline
        .results()
        .first::<sashimono_task::JarResult>()
        .map(|r| r.dependency.coordinate.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(classes: PathBuf) -> PackageArgs {
        PackageArgs {
            classes,
            coordinate: None,
            project: None,
            root: None,
            output: None,
            extension: None,
            sequential: false,
            json: false,
        }
    }

    #[test]
    fn test_coordinate_or_project_required() {
        let err = resolve_target(&args(PathBuf::from("classes"))).unwrap_err();
        assert!(err.to_string().contains("--coordinate"));
    }

    #[test]
    fn test_project_supplies_coordinate_and_root() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("project.json");
        std::fs::write(&project, r#"{"group":"com.example","artifact":"app","version":"1.0"}"#)
            .unwrap();

        let mut a = args(PathBuf::from("classes"));
        a.project = Some(project);
        let (coordinate, root) = resolve_target(&a).unwrap();
        assert_eq!(coordinate, Coordinate::new("com.example", "app", "1.0"));
        assert_eq!(root, dir.path());

        a.coordinate = Some(Coordinate::new("g", "override", "2"));
        assert_eq!(resolve_target(&a).unwrap().0.artifact, "override");
    }

    #[test]
    fn test_package_into_output() {
        let dir = TempDir::new().unwrap();
        let classes = dir.path().join("classes");
        std::fs::create_dir_all(classes.join("pkg")).unwrap();
        std::fs::write(classes.join("pkg/B.class"), b"b").unwrap();

        let mut a = args(classes);
        a.coordinate = Some(Coordinate::new("com.example", "app", "1.0"));
        a.root = Some(dir.path().to_path_buf());
        a.output = Some(dir.path().join("repo"));
        a.extension = Some("war".into());
        run(a).unwrap();

        assert!(dir
            .path()
            .join("repo/com/example/app/1.0/app-1.0.war")
            .is_file());
    }
}
