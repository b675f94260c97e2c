//! `sashimono generate`

use anyhow::Context;
use clap::Args;
use sashimono_core::{Bridge, ProjectModel};
use sashimono_foundation::{load_json, BuildConfig, Dependency};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project model written by the host
    #[arg(long, default_value = "project.json")]
    pub project: PathBuf,

    /// Goals the host was invoked with (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub goals: Vec<String>,

    /// Goal the bridge itself runs under
    #[arg(long)]
    pub current_goal: Option<String>,

    /// Host command named in corrective messages
    #[arg(long)]
    pub host_command: Option<String>,

    /// Whether the host filtered resources; overrides the model either way
    #[arg(long, value_name = "true|false")]
    pub resources_filtered: Option<bool>,

    /// Resolved dependency list (JSON); defaults to the model's dependencies
    #[arg(long)]
    pub dependencies: Option<PathBuf>,

    /// Apply the phase gate to every packaging, not only plugin projects
    #[arg(long)]
    pub strict: bool,
}

impl GenerateArgs {
    fn config(&self, project_root: &std::path::Path) -> anyhow::Result<BuildConfig> {
        let mut config = BuildConfig::load(project_root)?;
        if let Some(goal) = &self.current_goal {
            config.current_goal = Some(goal.clone());
        }
        if let Some(host) = &self.host_command {
            config.host_command = Some(host.clone());
        }
        Ok(config)
    }
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let model = ProjectModel::load(&args.project)
        .with_context(|| format!("loading project model {}", args.project.display()))?;
    let config = args.config(&model.base_dir)?;
    let resources_filtered = args.resources_filtered.unwrap_or(model.resources_filtered);

    let dependencies_file = args.dependencies.clone();
    let declared = model.dependencies.clone();
    let supplier = move || -> sashimono_foundation::Result<Vec<Dependency>> {
        match dependencies_file {
            Some(path) => {
                info!("Reading resolved dependencies from {}", path.display());
                load_json(&path)
            }
            None => Ok(declared),
        }
    };

    let report = Bridge::new(config)
        .strict(args.strict)
        .generate(&model, &args.goals, resources_filtered, supplier)?;

    println!(
        "Wrote {} ({} required, {} skipped)",
        report.path.display(),
        report.required,
        report.skipped
    );
    Ok(())
}
