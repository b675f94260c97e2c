//! Pipeline - runs tasks against one build invocation's result store
//!
//! Features:
//! - One fresh `TaskResultStore` per invocation, discarded afterwards
//! - Each task's output published back under its kind
//! - Per-task state and duration records
//! - Tracing span carrying the invocation id
//!
//! Tasks run one after another on the caller's thread; the store is only
//! reachable through `&mut Pipeline`, so each kind has a single writer.

use crate::store::{TaskResult, TaskResultStore};
use crate::task::{InvocationId, Task, TaskRecord};
use sashimono_foundation::Result;
use std::time::Instant;
use tracing::{error, info, info_span};

/// Executes tasks and collects their results for one invocation
#[derive(Debug, Default)]
pub struct Pipeline {
    id: InvocationId,
    results: TaskResultStore,
    records: Vec<TaskRecord>,
}

impl Pipeline {
    /// Create a pipeline with an empty result store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> InvocationId {
        self.id
    }

    /// Results published so far
    pub fn results(&self) -> &TaskResultStore {
        &self.results
    }

    /// Publish a result produced outside the pipeline (an external collaborator)
    pub fn publish<T: TaskResult>(&mut self, value: T) -> Result<()> {
        info!(invocation = %self.id, kind = T::KIND, "Publishing external result");
        self.results.put(value)?;
        Ok(())
    }

    /// Run `task`, publish its output and return a reference to it
    pub fn run<T: Task>(&mut self, task: &T) -> Result<&T::Output> {
        let span = info_span!("task", invocation = %self.id, task = task.name());
        let _enter = span.enter();

        let mut record = TaskRecord::new(task.name(), T::Output::KIND);
        record.start();
        info!("Executing task {} -> {}", task.name(), T::Output::KIND);

        let started = Instant::now();
        let outcome = task
            .execute(&self.results)
            .and_then(|output| self.results.put(output));
        let elapsed = started.elapsed();

        match outcome {
            Ok(_) => {
                info!("Task {} completed in {:?}", task.name(), elapsed);
                record.complete(elapsed);
                self.records.push(record);
                self.results.last::<T::Output>()
            }
            Err(e) => {
                error!("Task {} failed: {}", task.name(), e);
                record.fail(e.to_string(), elapsed);
                self.records.push(record);
                Err(e)
            }
        }
    }

    /// Records of every task run so far, in execution order
    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    /// True when every task run so far completed
    /// Consume the pipeline, keeping only its results
    pub fn into_results(self) -> TaskResultStore {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TaskState;
    use sashimono_foundation::Error;

    #[derive(Debug, Clone, PartialEq)]
    struct Number(u32);

    impl TaskResult for Number {
        const KIND: &'static str = "Number";
    }

    #[derive(Debug, PartialEq)]
    struct Doubled(u32);

    impl TaskResult for Doubled {
        const KIND: &'static str = "Doubled";
    }

    struct DoubleTask;

    impl Task for DoubleTask {
        type Output = Doubled;

        fn name(&self) -> &str {
            "double"
        }

        fn execute(&self, results: &TaskResultStore) -> Result<Doubled> {
            let n = results.first::<Number>()?;
            Ok(Doubled(n.0 * 2))
        }
    }

    #[test]
    fn test_run_publishes_output() {
        let mut pipeline = Pipeline::new();
        pipeline.publish(Number(21)).unwrap();

        let out = pipeline.run(&DoubleTask).unwrap();
        assert_eq!(out, &Doubled(42));
        assert_eq!(pipeline.results().get::<Doubled>(), &[Doubled(42)]);

        let records = pipeline.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "double");
        assert_eq!(records[0].kind, "Doubled");
        assert_eq!(records[0].state, TaskState::Completed);
    }

    #[test]
    fn test_missing_input_fails_and_is_recorded() {
        let mut pipeline = Pipeline::new();

        let err = pipeline.run(&DoubleTask).unwrap_err();
        assert!(matches!(err, Error::MissingResult { ref kind } if kind == "Number"));
        assert!(matches!(pipeline.records()[0].state, TaskState::Failed(_)));
        assert!(pipeline.results().get::<Doubled>().is_empty());
    }

    #[test]
    fn test_each_invocation_has_fresh_store() {
        let mut first = Pipeline::new();
        first.publish(Number(1)).unwrap();
        let second = Pipeline::new();

        assert_ne!(first.id(), second.id());
        assert!(second.results().is_empty());
        assert_eq!(first.into_results().count("Number"), 1);
    }
}
