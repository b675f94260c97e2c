//! Task definition and types

use crate::state::TaskState;
use crate::store::{TaskResult, TaskResultStore};
use sashimono_foundation::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

/// Unique identifier of one build invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub Uuid);

impl InvocationId {
    /// Generate a new random InvocationId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A build step that reads prior results and produces one result
///
/// Tasks never talk to each other directly. Everything a task needs comes out
/// of the store by kind, and its output is published back under
/// `Self::Output::KIND` by the [`Pipeline`](crate::Pipeline).
pub trait Task {
    type Output: TaskResult;

    /// Task name for logs and records
    fn name(&self) -> &str;

    /// Run the task against the results published so far
    fn execute(&self, results: &TaskResultStore) -> Result<Self::Output>;
}

/// What happened to one task during a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task name
    pub name: String,

    /// Kind the task publishes
    pub kind: String,

    /// Final (or current) state
    pub state: TaskState,

    /// Wall time spent executing
    pub duration: Option<Duration>,
}

impl TaskRecord {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            state: TaskState::Pending,
            duration: None,
        }
    }

    /// Mark task as running
    pub fn start(&mut self) {
        self.transition(TaskState::Running);
    }

    /// Mark task as completed successfully
    pub fn complete(&mut self, duration: Duration) {
        self.transition(TaskState::Completed);
        self.duration = Some(duration);
    }

    /// Mark task as failed
    pub fn fail(&mut self, error: String, duration: Duration) {
        self.transition(TaskState::Failed(error));
        self.duration = Some(duration);
    }

    fn transition(&mut self, next: TaskState) {
        if !self.state.can_become(&next) {
            warn!("Task {} moved from {} to {}", self.name, self.state, next);
        }
        self.state = next;
    }
}
