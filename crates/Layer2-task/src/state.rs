//! Task state within one pipeline run
//!
//! `Pending -> Running -> Completed | Failed`. A task runs at most once per
//! pipeline, so there is no way back from a terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "error")]
pub enum TaskState {
    Pending,
    Running,
    /// Output published to the result store
    Completed,
    /// Execution or publication failed; nothing was published
    Failed(String),
}

impl TaskState {
    /// Whether `next` may follow this state
    pub fn can_become(&self, next: &TaskState) -> bool {
        matches!(
            (self, next),
            (TaskState::Pending, TaskState::Running)
                | (TaskState::Running, TaskState::Completed)
                | (TaskState::Running, TaskState::Failed(_))
        )
    }

    /// One-character marker for CLI summaries
    pub fn symbol(&self) -> &'static str {
        match self {
            TaskState::Pending => "◯",
            TaskState::Running => "⟳",
            TaskState::Completed => "✓",
            TaskState::Failed(_) => "✗",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Pending => f.write_str("pending"),
            TaskState::Running => f.write_str("running"),
            TaskState::Completed => f.write_str("completed"),
            TaskState::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}
