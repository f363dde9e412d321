//! Critical path analysis.
//!
//! Given a collection of tasks with durations and dependency links, this
//! module computes each task's earliest start, selects the terminal task
//! with the largest completion time, and reconstructs the chain of tasks
//! that realizes it. A supplementary backward pass derives per-task slack.

mod calculation;
mod types;

pub use calculation::{
    analyze_timings, compute_critical_path, compute_critical_path_with_config, CriticalPathError,
};
pub use types::{CriticalPath, CriticalPathConfig, TaskTiming};
