//! Console rendering of task lists
//!
//! Pure string builders; the menu loop decides where the output goes.

use crate::tasks::{Task, TaskStatus};

const TABLE_RULE: &str = "---------------------------------------------------------------";

/// Format the task table with 1-based numbers
///
/// # Arguments
/// * `rows` - Tasks with their computed status, in display order
///
/// # Returns
/// The table including its heading, or a "No tasks available." note
pub fn format_task_table(rows: &[(&Task, TaskStatus)]) -> String {
    let mut result = String::from("\nTASK LIST:\n");
    if rows.is_empty() {
        result.push_str("No tasks available.\n");
        return result;
    }

    result.push_str(&format!(
        "{:<5} | {:<30} | {:<10} | {:<12} | {:<10}\n",
        "No", "Task", "Priority", "Target Date", "Status"
    ));
    result.push_str(TABLE_RULE);
    result.push('\n');
    for (i, (task, status)) in rows.iter().enumerate() {
        result.push_str(&format!(
            "{:<5} | {:<30} | {:<10} | {:<12} | {:<10}\n",
            i + 1,
            task.description,
            task.priority.as_str(),
            task.target_date,
            status.to_string()
        ));
    }
    result
}

/// Format the overdue task list
pub fn format_overdue(tasks: &[&Task]) -> String {
    let mut result = String::from("\nOVERDUE TASKS:\n");
    if tasks.is_empty() {
        result.push_str("No overdue tasks.\n");
        return result;
    }
    for task in tasks {
        result.push_str(&format!(
            "- {} (Due: {})\n",
            task.description, task.target_date
        ));
    }
    result
}
