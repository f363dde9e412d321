//! Mermaid source generation for the task dependency graph.
//!
//! Emits a `graph TD` definition covering every task and dependency edge,
//! with critical path members highlighted. The host renders the source (and
//! exports it to vector/raster/paginated formats); none of that happens here.

use rustc_hash::FxHashSet;

use crate::critical_path::CriticalPath;
use crate::models::{Task, TaskId};
use crate::report::format_hours;

const CRITICAL_NODE_STYLE: &str = "fill:#ff9999";
const CRITICAL_EDGE_STYLE: &str = "stroke:#ff0000,stroke-width:2px";

/// Escape a task name for use inside a quoted Mermaid node label.
fn escape_label(name: &str) -> String {
    name.replace('"', "#quot;")
}

/// Generate Mermaid `graph TD` source for a task collection.
///
/// Nodes and edges follow the input declaration order, so the output is
/// deterministic. An edge is highlighted when both of its endpoints lie on
/// the critical path.
pub fn mermaid_diagram(tasks: &[Task], critical: &CriticalPath) -> String {
    let critical_ids: FxHashSet<TaskId> = critical.task_ids().into_iter().collect();

    let mut source = String::from("graph TD;\n");
    let mut edge_index = 0usize;
    let mut critical_edges: Vec<usize> = Vec::new();

    for task in tasks {
        source.push_str(&format!(
            "{}[\"{}<br/>{}\"];\n",
            task.id,
            escape_label(&task.name),
            format_hours(task.duration_hours())
        ));

        for &dep_id in &task.dependencies {
            source.push_str(&format!("{} --> {};\n", dep_id, task.id));
            if critical_ids.contains(&dep_id) && critical_ids.contains(&task.id) {
                critical_edges.push(edge_index);
            }
            edge_index += 1;
        }
    }

    for task in tasks {
        if critical_ids.contains(&task.id) {
            source.push_str(&format!("style {} {};\n", task.id, CRITICAL_NODE_STYLE));
        }
    }
    for index in critical_edges {
        source.push_str(&format!("linkStyle {} {};\n", index, CRITICAL_EDGE_STYLE));
    }

    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical_path::compute_critical_path;
    use crate::models::DurationUnit;

    fn make_task(id: TaskId, name: &str, duration: f64, deps: Vec<TaskId>) -> Task {
        Task {
            id,
            name: name.to_string(),
            duration,
            unit: DurationUnit::Hours,
            dependencies: deps,
        }
    }

    #[test]
    fn test_nodes_and_edges_emitted() {
        let tasks = vec![
            make_task(1, "Design", 8.0, vec![]),
            make_task(2, "Build", 16.0, vec![1]),
        ];
        let path = compute_critical_path(&tasks).unwrap();
        let source = mermaid_diagram(&tasks, &path);

        assert!(source.starts_with("graph TD;\n"));
        assert!(source.contains("1[\"Design<br/>8 hours\"];\n"));
        assert!(source.contains("2[\"Build<br/>16 hours\"];\n"));
        assert!(source.contains("1 --> 2;\n"));
    }

    #[test]
    fn test_critical_members_highlighted() {
        // Diamond: 1 -> 2 -> 4, 1 -> 3 -> 4; critical branch runs through 3
        let tasks = vec![
            make_task(1, "a", 1.0, vec![]),
            make_task(2, "b", 2.0, vec![1]),
            make_task(3, "c", 5.0, vec![1]),
            make_task(4, "d", 1.0, vec![2, 3]),
        ];
        let path = compute_critical_path(&tasks).unwrap();
        let source = mermaid_diagram(&tasks, &path);

        assert!(source.contains("style 1 fill:#ff9999;\n"));
        assert!(source.contains("style 3 fill:#ff9999;\n"));
        assert!(source.contains("style 4 fill:#ff9999;\n"));
        assert!(!source.contains("style 2 fill:#ff9999;\n"));

        // Edges in emission order: 1->2 (0), 1->3 (1), 2->4 (2), 3->4 (3).
        // Both endpoints critical only for 1->3 and 3->4.
        assert!(source.contains("linkStyle 1 stroke:#ff0000,stroke-width:2px;\n"));
        assert!(source.contains("linkStyle 3 stroke:#ff0000,stroke-width:2px;\n"));
        assert!(!source.contains("linkStyle 0 "));
        assert!(!source.contains("linkStyle 2 "));
    }

    #[test]
    fn test_label_quotes_escaped() {
        let tasks = vec![make_task(1, "say \"hi\"", 1.0, vec![])];
        let path = compute_critical_path(&tasks).unwrap();
        let source = mermaid_diagram(&tasks, &path);
        assert!(source.contains("1[\"say #quot;hi#quot;<br/>1 hour\"];\n"));
    }

    #[test]
    fn test_empty_collection() {
        let source = mermaid_diagram(&[], &CriticalPath::default());
        assert_eq!(source, "graph TD;\n");
    }
}
