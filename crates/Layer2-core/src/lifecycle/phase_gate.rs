//! Phase gate - refuses to run before the host produced our inputs
//!
//! The bridge reads build outputs (compiled classes, generated plugin
//! descriptors) that only exist once the host has run its lifecycle up to
//! `process-classes`. The gate scans the goals the host was asked to run, in
//! order, until it reaches the bridge's own goal:
//!
//! - goals containing `:` are explicit plugin invocations and are skipped
//! - clean-lifecycle phases are skipped
//! - a phase outside the required list, or the final required phase, means
//!   the host runs far enough: pass
//! - reaching our own goal (or the end of the list) first: fail with the
//!   command that would have worked

use sashimono_foundation::{Error, Result};
use tracing::debug;

/// Phases that must have run before the bridge, in lifecycle order
pub const REQUIRED_PHASES: &[&str] = &[
    "validate",
    "initialize",
    "generate-sources",
    "process-sources",
    "generate-resources",
    "process-resources",
    "compile",
    "process-classes",
];

/// Phases that say nothing about the build outputs
pub const IGNORED_PHASES: &[&str] = &["pre-clean", "clean", "post-clean"];

/// Goals the host will run: the explicit ones, or the project's default goal
/// (whitespace separated) when none were given
pub fn resolve_goals(goals: &[String], default_goal: Option<&str>) -> Vec<String> {
    if !goals.is_empty() {
        return goals.to_vec();
    }
    default_goal
        .map(|g| g.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Readiness check over a host goal sequence
#[derive(Debug, Clone)]
pub struct PhaseGate {
    current_goal: String,
    host_command: String,
    required: Vec<String>,
    ignored: Vec<String>,
}

impl PhaseGate {
    pub fn new(current_goal: impl Into<String>, host_command: impl Into<String>) -> Self {
        Self {
            current_goal: current_goal.into(),
            host_command: host_command.into(),
            required: REQUIRED_PHASES.iter().map(|p| p.to_string()).collect(),
            ignored: IGNORED_PHASES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_required_phases<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = phases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignored_phases<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored = phases.into_iter().map(Into::into).collect();
        self
    }

    /// Command that runs the required phases and then the bridge
    pub fn corrective_command(&self) -> String {
        match self.required.last() {
            Some(last) => format!("{} {} {}", self.host_command, last, self.current_goal),
            None => format!("{} {}", self.host_command, self.current_goal),
        }
    }

    /// Ok when `goals` run the host far enough before the bridge's goal
    pub fn check<S: AsRef<str>>(&self, goals: &[S]) -> Result<()> {
        for goal in goals {
            let goal = goal.as_ref();
            if goal.ends_with(self.current_goal.as_str()) {
                break;
            }
            if goal.contains(':') || self.ignored.iter().any(|p| p == goal) {
                debug!("Phase gate skips {}", goal);
                continue;
            }
            match self.required.iter().position(|p| p == goal) {
                Some(i) if i + 1 < self.required.len() => {
                    debug!("Phase gate: {} runs, later phases still needed", goal);
                }
                _ => {
                    debug!("Phase gate satisfied by {}", goal);
                    return Ok(());
                }
            }
        }

        let command = self.corrective_command();
        Err(Error::unmet_precondition(
            format!(
                "Required build phases have not run before {}. Please run '{}' to ensure all required files are generated",
                self.current_goal, command
            ),
            command,
        ))
    }
}
