//! # sashimono-task
//!
//! Typed task graph for Sashimono.
//! Tasks exchange results through a store keyed by result kind, so a step
//! depends on "the compiled classes" rather than on whichever task made them.
//!
//! ## Features
//!
//! - `TaskResultStore`: heterogeneous, append-only, kind-keyed results
//! - `Task` contract and a sequential `Pipeline` with per-task records
//! - `JarTask`: reproducible packaging laid out by coordinate

pub mod compile;
pub mod packaging;
pub mod pipeline;
pub mod state;
pub mod store;
pub mod task;

pub use compile::{ClassesDirectoryTask, CompileResult};
pub use packaging::{JarResult, JarTask};
pub use pipeline::Pipeline;
pub use state::TaskState;
pub use store::{TaskResult, TaskResultStore};
pub use task::{InvocationId, Task, TaskRecord};
