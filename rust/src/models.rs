//! Core data types for critical path analysis.

use pyo3::prelude::*;

/// Task identifier. The host assigns these; timestamp-derived integers in practice.
pub type TaskId = i64;

/// Unit a task's duration is expressed in.
///
/// All cross-task arithmetic happens in normalized hours; `Days` counts as
/// 24 hours per day.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Hours,
    Days,
}

impl DurationUnit {
    /// Convert a duration expressed in this unit to hours.
    pub fn to_hours(self, duration: f64) -> f64 {
        match self {
            DurationUnit::Hours => duration,
            DurationUnit::Days => duration * 24.0,
        }
    }
}

/// A unit of schedulable work.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: TaskId,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub unit: DurationUnit,
    /// IDs of tasks that must finish before this one may start.
    #[pyo3(get, set)]
    pub dependencies: Vec<TaskId>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (id, name, duration, unit, dependencies=None))]
    fn new(
        id: TaskId,
        name: String,
        duration: f64,
        unit: DurationUnit,
        dependencies: Option<Vec<TaskId>>,
    ) -> Self {
        Self {
            id,
            name,
            duration,
            unit,
            dependencies: dependencies.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={}, name={:?}, duration={} {:?}, deps={})",
            self.id,
            self.name,
            self.duration,
            self.unit,
            self.dependencies.len()
        )
    }
}

impl Task {
    /// The task's duration in normalized hours.
    pub fn duration_hours(&self) -> f64 {
        self.unit.to_hours(self.duration)
    }
}
