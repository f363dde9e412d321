//! Human-readable formatting of critical path results.
//!
//! The host list renderer displays the chain with connecting markers and a
//! total-duration string; the same summary text feeds the external analysis
//! service.

use crate::critical_path::CriticalPath;

/// Format a quantity with a singular or plural unit word.
///
/// Whole quantities print without a fractional part.
fn format_quantity(value: f64, unit: &str) -> String {
    if value == 1.0 {
        format!("1 {}", unit)
    } else if value.fract() == 0.0 {
        format!("{} {}s", value as i64, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

/// Format a normalized hour count as "H hours", "D days", or
/// "D days and H hours".
pub fn format_hours(total_hours: f64) -> String {
    let days = (total_hours / 24.0).floor();
    let hours = total_hours - days * 24.0;

    if days == 0.0 {
        format_quantity(hours, "hour")
    } else if hours == 0.0 {
        format_quantity(days, "day")
    } else {
        format!(
            "{} and {}",
            format_quantity(days, "day"),
            format_quantity(hours, "hour")
        )
    }
}

/// One-line summary of a critical path: task names in execution order
/// joined by arrows, with the formatted total duration.
pub fn path_summary(path: &CriticalPath) -> String {
    if path.tasks.is_empty() {
        return "No tasks to analyze.".to_string();
    }

    let names: Vec<&str> = path.tasks.iter().map(|t| t.name.as_str()).collect();
    format!("{} ({})", names.join(" -> "), format_hours(path.total_hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationUnit, Task};

    fn make_task(id: i64, name: &str, duration: f64) -> Task {
        Task {
            id,
            name: name.to_string(),
            duration,
            unit: DurationUnit::Hours,
            dependencies: vec![],
        }
    }

    #[test]
    fn test_format_hours_only() {
        assert_eq!(format_hours(0.0), "0 hours");
        assert_eq!(format_hours(1.0), "1 hour");
        assert_eq!(format_hours(5.0), "5 hours");
        assert_eq!(format_hours(2.5), "2.5 hours");
    }

    #[test]
    fn test_format_whole_days() {
        assert_eq!(format_hours(24.0), "1 day");
        assert_eq!(format_hours(48.0), "2 days");
    }

    #[test]
    fn test_format_days_and_hours() {
        assert_eq!(format_hours(25.0), "1 day and 1 hour");
        assert_eq!(format_hours(29.0), "1 day and 5 hours");
        assert_eq!(format_hours(53.0), "2 days and 5 hours");
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(path_summary(&CriticalPath::default()), "No tasks to analyze.");
    }

    #[test]
    fn test_summary_chain() {
        let path = CriticalPath {
            tasks: vec![
                make_task(1, "Design", 8.0),
                make_task(2, "Build", 16.0),
                make_task(3, "Test", 5.0),
            ],
            total_hours: 29.0,
        };
        assert_eq!(
            path_summary(&path),
            "Design -> Build -> Test (1 day and 5 hours)"
        );
    }
}
