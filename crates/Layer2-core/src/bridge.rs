//! Bridge - the `generate` flow
//!
//! Checks the host lifecycle, then projects the manifest. Plugin projects are
//! always gated because their descriptor is produced by `process-classes`;
//! other packagings are gated only in strict mode.

use crate::lifecycle::{resolve_goals, PhaseGate};
use crate::manifest::{ManifestProjector, ManifestReport};
use crate::project::ProjectModel;
use sashimono_foundation::{BuildConfig, Dependency, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Bridge {
    config: BuildConfig,
    strict: bool,
}

impl Bridge {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Gate every project, not just plugin projects
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn phase_gate(&self) -> PhaseGate {
        PhaseGate::new(self.config.current_goal(), self.config.host_command())
    }

    fn gated(&self, model: &ProjectModel) -> bool {
        self.strict || model.is_plugin()
    }

    /// Run the phase gate (when it applies) and write the manifest
    pub fn generate<F>(
        &self,
        model: &ProjectModel,
        goals: &[String],
        resources_filtered: bool,
        supplier: F,
    ) -> Result<ManifestReport>
    where
        F: FnOnce() -> Result<Vec<Dependency>>,
    {
        if self.gated(model) {
            let goals = resolve_goals(goals, model.default_goal.as_deref());
            debug!("Checking goals {:?}", goals);
            self.phase_gate().check(&goals)?;
        }

        info!("Projecting {} ({})", model.coordinate, model.effective_packaging());
        ManifestProjector::new().project(model, resources_filtered, supplier)
    }
}
