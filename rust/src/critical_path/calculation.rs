//! Critical path calculation using forward and backward passes.
//!
//! The dependency graph is built once per invocation: an ID -> task map,
//! deduplicated forward edges, and reverse edges for O(1) terminal detection.
//! Earliest starts are computed iteratively in topological order rather than
//! by recursion, so shared ancestors are evaluated exactly once and deep
//! graphs cannot overflow the stack.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use thiserror::Error;

use crate::models::{Task, TaskId};
use crate::{log_checks, log_debug, log_decisions};

use super::types::{CriticalPath, CriticalPathConfig, TaskTiming};

/// Errors that can occur during critical path calculation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriticalPathError {
    #[error("Task {task} depends on unknown task {dependency}")]
    DanglingDependency { task: TaskId, dependency: TaskId },
    #[error("Circular dependency detected involving tasks {0:?}")]
    CircularDependency(Vec<TaskId>),
}

/// Dependency graph built once per invocation.
///
/// The input collection is read-only; the graph borrows it and never
/// outlives the call.
struct TaskGraph<'a> {
    tasks: FxHashMap<TaskId, &'a Task>,
    /// Dependencies per task, duplicates removed, declaration order preserved.
    deps: FxHashMap<TaskId, Vec<TaskId>>,
    /// Reverse edges: task ID -> IDs of tasks that depend on it.
    dependents: FxHashMap<TaskId, Vec<TaskId>>,
}

impl<'a> TaskGraph<'a> {
    /// Build the graph, failing fast on the first dangling reference.
    fn build(tasks: &'a [Task]) -> Result<Self, CriticalPathError> {
        let mut by_id: FxHashMap<TaskId, &Task> =
            FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
        for task in tasks {
            // First occurrence wins if the host hands us a duplicate ID
            by_id.entry(task.id).or_insert(task);
        }

        let mut deps: FxHashMap<TaskId, Vec<TaskId>> =
            FxHashMap::with_capacity_and_hasher(by_id.len(), Default::default());
        let mut dependents: FxHashMap<TaskId, Vec<TaskId>> = FxHashMap::default();

        for (&task_id, task) in &by_id {
            let mut seen: FxHashSet<TaskId> = FxHashSet::default();
            let mut unique: Vec<TaskId> = Vec::with_capacity(task.dependencies.len());
            for &dep_id in &task.dependencies {
                if !by_id.contains_key(&dep_id) {
                    return Err(CriticalPathError::DanglingDependency {
                        task: task_id,
                        dependency: dep_id,
                    });
                }
                if seen.insert(dep_id) {
                    unique.push(dep_id);
                    dependents.entry(dep_id).or_default().push(task_id);
                }
            }
            deps.insert(task_id, unique);
        }

        Ok(Self {
            tasks: by_id,
            deps,
            dependents,
        })
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Normalized duration of a task in hours.
    fn duration_hours(&self, id: TaskId) -> f64 {
        self.tasks.get(&id).map(|t| t.duration_hours()).unwrap_or(0.0)
    }

    /// Terminal tasks: tasks no other task lists as a dependency.
    ///
    /// Sorted ascending so selection and logging are deterministic.
    fn terminal_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self
            .tasks
            .keys()
            .filter(|id| !self.dependents.contains_key(*id))
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Perform topological sort of the graph using Kahn's algorithm.
///
/// Returns task IDs with every dependency ordered before its dependents.
fn topological_order(graph: &TaskGraph<'_>) -> Result<Vec<TaskId>, CriticalPathError> {
    let mut in_degree: FxHashMap<TaskId, usize> = graph
        .deps
        .iter()
        .map(|(&id, deps)| (id, deps.len()))
        .collect();

    let mut queue: VecDeque<TaskId> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(graph.len());

    while let Some(task_id) = queue.pop_front() {
        order.push(task_id);

        if let Some(dependents) = graph.dependents.get(&task_id) {
            for &dependent_id in dependents {
                if let Some(degree) = in_degree.get_mut(&dependent_id) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dependent_id);
                    }
                }
            }
        }
    }

    if order.len() != graph.len() {
        // Everything not placed sits on or downstream of a cycle
        let placed: FxHashSet<TaskId> = order.iter().copied().collect();
        let mut cyclic: Vec<TaskId> = graph
            .tasks
            .keys()
            .filter(|id| !placed.contains(*id))
            .copied()
            .collect();
        cyclic.sort_unstable();
        return Err(CriticalPathError::CircularDependency(cyclic));
    }

    Ok(order)
}

/// Forward pass: earliest start of each task, in normalized hours.
///
/// A task with no dependencies starts at 0; otherwise at the maximum of
/// its dependencies' finish times.
fn earliest_starts(graph: &TaskGraph<'_>, order: &[TaskId]) -> FxHashMap<TaskId, f64> {
    let mut starts: FxHashMap<TaskId, f64> =
        FxHashMap::with_capacity_and_hasher(order.len(), Default::default());

    for &task_id in order {
        let mut earliest = 0.0;
        if let Some(deps) = graph.deps.get(&task_id) {
            for &dep_id in deps {
                let dep_finish =
                    starts.get(&dep_id).copied().unwrap_or(0.0) + graph.duration_hours(dep_id);
                if dep_finish > earliest {
                    earliest = dep_finish;
                }
            }
        }
        starts.insert(task_id, earliest);
    }

    starts
}

/// Compute the critical path of a task collection.
///
/// Returns the longest chain of dependency-ordered tasks and its total
/// duration in normalized hours. An empty collection yields an empty path.
///
/// # Errors
/// * `DanglingDependency` if a dependency references an unknown task ID
/// * `CircularDependency` if the dependency graph has a cycle
pub fn compute_critical_path(tasks: &[Task]) -> Result<CriticalPath, CriticalPathError> {
    compute_critical_path_with_config(tasks, &CriticalPathConfig::default())
}

/// Compute the critical path, logging decisions per the config's verbosity.
pub fn compute_critical_path_with_config(
    tasks: &[Task],
    config: &CriticalPathConfig,
) -> Result<CriticalPath, CriticalPathError> {
    if tasks.is_empty() {
        return Ok(CriticalPath::default());
    }

    let graph = TaskGraph::build(tasks)?;
    let order = topological_order(&graph)?;
    let starts = earliest_starts(&graph, &order);

    if config.verbosity >= crate::logging::VERBOSITY_DEBUG {
        for &task_id in &order {
            log_debug!(
                config.verbosity,
                "task {}: earliest start {}h",
                task_id,
                starts.get(&task_id).copied().unwrap_or(0.0)
            );
        }
    }

    // Select the terminal task with the largest completion time.
    // Terminals are scanned in ascending ID order with a strict comparison,
    // so ties go to the smallest ID.
    let mut best: Option<(f64, TaskId)> = None;
    for terminal_id in graph.terminal_ids() {
        let completion = starts.get(&terminal_id).copied().unwrap_or(0.0)
            + graph.duration_hours(terminal_id);
        log_checks!(
            config.verbosity,
            "terminal task {}: completion {}h",
            terminal_id,
            completion
        );
        let replace = match best {
            None => true,
            Some((best_completion, _)) => completion > best_completion,
        };
        if replace {
            best = Some((completion, terminal_id));
        }
    }

    // Unreachable for a non-empty acyclic graph
    let Some((total_hours, terminal_id)) = best else {
        return Ok(CriticalPath::default());
    };

    log_decisions!(
        config.verbosity,
        "critical terminal {} finishes at {}h",
        terminal_id,
        total_hours
    );

    // Walk backward from the terminal along dependencies whose finish time
    // exactly equals the current task's earliest start. Both sides of the
    // comparison use the same normalized-hour arithmetic, so the maximum
    // found in the forward pass always has a witness.
    let mut chain: Vec<TaskId> = vec![terminal_id];
    let mut current = terminal_id;
    loop {
        let earliest = starts.get(&current).copied().unwrap_or(0.0);
        let predecessor = match graph.deps.get(&current) {
            Some(deps) => deps.iter().copied().find(|&dep_id| {
                starts.get(&dep_id).copied().unwrap_or(0.0) + graph.duration_hours(dep_id)
                    == earliest
            }),
            None => None,
        };
        match predecessor {
            Some(dep_id) => {
                log_decisions!(config.verbosity, "  predecessor {} -> {}", dep_id, current);
                chain.push(dep_id);
                current = dep_id;
            }
            None => break,
        }
    }
    chain.reverse();

    let path_tasks: Vec<Task> = chain
        .iter()
        .filter_map(|id| graph.tasks.get(id).map(|&t| t.clone()))
        .collect();

    Ok(CriticalPath {
        tasks: path_tasks,
        total_hours,
    })
}

/// Compute forward and backward pass timings for every task.
///
/// Slack is measured against the project makespan (the maximum earliest
/// finish over all tasks); tasks with zero slack are critical.
///
/// # Errors
/// Same conditions as [`compute_critical_path`].
pub fn analyze_timings(
    tasks: &[Task],
) -> Result<FxHashMap<TaskId, TaskTiming>, CriticalPathError> {
    if tasks.is_empty() {
        return Ok(FxHashMap::default());
    }

    let graph = TaskGraph::build(tasks)?;
    let order = topological_order(&graph)?;
    let starts = earliest_starts(&graph, &order);

    // Forward pass results and the project makespan
    let mut timings: FxHashMap<TaskId, TaskTiming> =
        FxHashMap::with_capacity_and_hasher(order.len(), Default::default());
    let mut makespan = 0.0;

    for &task_id in &order {
        let earliest_start = starts.get(&task_id).copied().unwrap_or(0.0);
        let earliest_finish = earliest_start + graph.duration_hours(task_id);
        if earliest_finish > makespan {
            makespan = earliest_finish;
        }
        timings.insert(
            task_id,
            TaskTiming {
                earliest_start,
                earliest_finish,
                latest_start: 0.0,  // Will be filled in backward pass
                latest_finish: 0.0, // Will be filled in backward pass
                slack: 0.0,         // Will be computed after backward pass
            },
        );
    }

    // Backward pass: latest finish is the minimum latest start over all
    // dependents, or the makespan for terminal tasks
    for &task_id in order.iter().rev() {
        let mut latest_finish = f64::MAX;
        if let Some(dependents) = graph.dependents.get(&task_id) {
            for dependent_id in dependents {
                if let Some(dependent_timing) = timings.get(dependent_id) {
                    if dependent_timing.latest_start < latest_finish {
                        latest_finish = dependent_timing.latest_start;
                    }
                }
            }
        }
        if latest_finish == f64::MAX {
            latest_finish = makespan;
        }

        let duration = graph.duration_hours(task_id);
        if let Some(timing) = timings.get_mut(&task_id) {
            timing.latest_finish = latest_finish;
            timing.latest_start = latest_finish - duration;
            timing.slack = timing.latest_start - timing.earliest_start;
        }
    }

    Ok(timings)
}
