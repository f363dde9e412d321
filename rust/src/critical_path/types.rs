//! Types for critical path analysis.

use pyo3::prelude::*;

use crate::models::{Task, TaskId};

/// Configuration for the critical path engine.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CriticalPathConfig {
    /// Verbosity level: 0=silent, 1=decisions, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl CriticalPathConfig {
    #[new]
    #[pyo3(signature = (verbosity=0))]
    fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    fn __repr__(&self) -> String {
        format!("CriticalPathConfig(verbosity={})", self.verbosity)
    }
}

impl Default for CriticalPathConfig {
    fn default() -> Self {
        Self { verbosity: 0 }
    }
}

/// Result of a critical path computation.
///
/// `tasks` runs from a task with no dependencies to a terminal task;
/// `total_hours` is the sum of normalized durations along that chain.
/// Empty input yields the default value (empty path, zero hours).
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CriticalPath {
    #[pyo3(get)]
    pub tasks: Vec<Task>,
    #[pyo3(get)]
    pub total_hours: f64,
}

#[pymethods]
impl CriticalPath {
    fn __repr__(&self) -> String {
        format!(
            "CriticalPath(tasks={}, total_hours={})",
            self.tasks.len(),
            self.total_hours
        )
    }
}

impl CriticalPath {
    /// IDs of the tasks on the path, in execution order.
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id).collect()
    }
}

/// Per-task timing information from the forward and backward passes.
///
/// All values are hours relative to project start.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    #[pyo3(get)]
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    #[pyo3(get)]
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    #[pyo3(get)]
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    #[pyo3(get)]
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    #[pyo3(get)]
    pub slack: f64,
}

#[pymethods]
impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        // Allow small epsilon for floating point comparison
        self.slack.abs() < 1e-9
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, slack={})",
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}
