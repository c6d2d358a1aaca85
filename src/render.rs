//! Response formatting
//!
//! Pure functions from operation results to the exact strings shown to the
//! user. Shared by every presentation layer; nothing here touches state or
//! does I/O.

use std::fmt::Write as _;

use crate::domain::{Task, TaskList};

const LOGO: &str = r#"     _   _    _  _______
    | | / \  | |/ / ____|
 _  | |/ _ \ | ' /|  _|
| |_| / ___ \| . \| |___
 \___/_/   \_\_|\_\_____|"#;

pub fn welcome() -> String {
    format!("Hello from\n{}\nWhat can I do for you today?", LOGO)
}

pub fn goodbye() -> String {
    "Bye. Hope to see you again soon!".to_string()
}

pub fn invalid_command() -> String {
    "Invalid task!!! Try another one".to_string()
}

pub fn error(message: &str) -> String {
    format!("Error: {}", message)
}

pub fn loading_error() -> String {
    "Error loading tasks from file. Starting with empty task list.".to_string()
}

pub fn corrupted_line(line: &str) -> String {
    format!("Corrupted line ignored: {}", line)
}

pub fn task_added(task: &Task, total: usize) -> String {
    format!(
        "{} task has been added:\n{}\nNow you have {} tasks in the list.",
        task.kind().type_name(),
        task,
        total
    )
}

pub fn task_deleted(task: &Task, remaining: usize) -> String {
    format!(
        "Noted. I've removed this task:\n{}\nNow you have {} tasks in the list.",
        task, remaining
    )
}

pub fn task_marked(task: &Task) -> String {
    format!("Nice! I've marked this task as done:\n{}", task)
}

pub fn task_unmarked(task: &Task) -> String {
    format!("OK, I've marked this task as not done yet:\n{}", task)
}

pub fn task_list(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "Your task list is empty!".to_string();
    }
    format!("Here are the tasks in your list:\n{}", numbered(tasks))
}

pub fn find_results(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "No matching tasks found in your list.".to_string();
    }
    format!("Here are the matching tasks in your list:\n{}", numbered(tasks))
}

pub fn search_results(tasks: &TaskList, term: &str) -> String {
    if tasks.is_empty() {
        return format!("No tasks found matching '{}'.", term);
    }
    format!(
        "Here are the tasks matching '{}':\n{}",
        term,
        numbered(tasks)
    )
}

pub fn tag_added(task: &Task, tag: &str) -> String {
    format!("Tag '{}' added to task:\n{}", tag, task)
}

pub fn tag_removed(task: &Task, tag: &str) -> String {
    format!("Tag '{}' removed from task:\n{}", tag, task)
}

pub fn tag_not_found(task: &Task, tag: &str) -> String {
    format!("Tag '{}' not found on task:\n{}", tag, task)
}

pub fn all_tags_removed(task: &Task, removed: &[String]) -> String {
    let mut out = String::from("All tags removed from task:\n");
    if !removed.is_empty() {
        let _ = writeln!(out, "Removed tags: {}", removed.join(", "));
    }
    let _ = write!(out, "Updated task: {}", task);
    out
}

/// Result of removing a named list of tags: single hits and misses reuse
/// the one-tag messages, anything else gets an itemized summary
pub fn untag_result(task: &Task, removed: &[String], missing: &[String]) -> String {
    match (removed, missing) {
        ([only], []) => tag_removed(task, only),
        ([], [only]) => tag_not_found(task, only),
        _ => {
            let mut out = String::new();
            if !removed.is_empty() {
                let _ = writeln!(out, "Removed tags: {}", removed.join(", "));
            }
            if !missing.is_empty() {
                let _ = writeln!(out, "Tags not found: {}", missing.join(", "));
            }
            let _ = write!(out, "Updated task: {}", task);
            out
        }
    }
}

/// 1-based numbered rendering, one task per line
fn numbered(tasks: &TaskList) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| format!("{}. {}", i + 1, task))
        .collect::<Vec<_>>()
        .join("\n")
}
