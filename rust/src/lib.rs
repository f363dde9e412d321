//! Rust implementation of the critpath analysis engine.
//!
//! This module provides the data structures and algorithms behind the
//! critical path analysis tool. The host application supplies the task
//! collection and renders what comes back; everything here is pure
//! computation.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

pub mod critical_path;
pub mod diagram;
pub mod logging;
mod models;
pub mod report;

pub use critical_path::{
    analyze_timings, compute_critical_path, compute_critical_path_with_config, CriticalPath,
    CriticalPathConfig, CriticalPathError, TaskTiming,
};
pub use diagram::mermaid_diagram;
pub use models::{DurationUnit, Task, TaskId};
pub use report::{format_hours, path_summary};

/// Compute the critical path of a task collection.
///
/// The critical path is the longest chain of dependency-ordered tasks; its
/// total duration is the minimum completion time of the whole collection.
///
/// # Arguments
/// * `tasks` - List of tasks with durations and dependency links
/// * `config` - Optional engine configuration (verbosity)
///
/// # Returns
/// * CriticalPath with the ordered chain and its total in normalized hours
///
/// # Raises
/// * ValueError if a dependency references an unknown task ID
/// * ValueError if the dependency graph contains a cycle
#[pyfunction]
#[pyo3(signature = (tasks, config=None))]
fn run_critical_path(
    tasks: Vec<Task>,
    config: Option<CriticalPathConfig>,
) -> PyResult<CriticalPath> {
    let config = config.unwrap_or_default();

    match compute_critical_path_with_config(&tasks, &config) {
        Ok(path) => Ok(path),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Compute forward and backward pass timings for every task.
///
/// # Arguments
/// * `tasks` - List of tasks with durations and dependency links
///
/// # Returns
/// * Dict mapping task ID to TaskTiming (earliest/latest start and finish,
///   slack relative to the project makespan)
///
/// # Raises
/// * ValueError on dangling references or cycles, as for run_critical_path
#[pyfunction]
fn run_timing_analysis(tasks: Vec<Task>) -> PyResult<HashMap<TaskId, TaskTiming>> {
    match analyze_timings(&tasks) {
        // Convert to std HashMap for PyO3 interface compatibility
        Ok(timings) => Ok(timings.into_iter().collect()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Generate Mermaid `graph TD` source for the full task graph.
///
/// Critical path members are highlighted; the host is responsible for
/// rendering and exporting the diagram.
#[pyfunction]
fn render_diagram(tasks: Vec<Task>, path: CriticalPath) -> String {
    mermaid_diagram(&tasks, &path)
}

/// Format a normalized hour count as a human-readable duration string.
#[pyfunction]
fn format_duration(hours: f64) -> String {
    format_hours(hours)
}

/// One-line textual summary of a critical path, suitable for the list
/// renderer and as input to the external analysis service.
#[pyfunction]
fn summarize_path(path: CriticalPath) -> String {
    path_summary(&path)
}

/// The critpath.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<DurationUnit>()?;
    m.add_class::<CriticalPath>()?;
    m.add_class::<TaskTiming>()?;

    // Config types
    m.add_class::<CriticalPathConfig>()?;

    // Algorithms and renderers
    m.add_function(wrap_pyfunction!(run_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(run_timing_analysis, m)?)?;
    m.add_function(wrap_pyfunction!(render_diagram, m)?)?;
    m.add_function(wrap_pyfunction!(format_duration, m)?)?;
    m.add_function(wrap_pyfunction!(summarize_path, m)?)?;

    Ok(())
}
