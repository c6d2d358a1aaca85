//! Task domain model
//!
//! A task is one of three variants: a plain todo, a deadline with a due
//! date, or an event with a start and an end. All variants share a name,
//! a done flag, and an ordered set of tags.
//!
//! Dates are accepted in ISO form (`2023-12-25T23:59:59`) and rendered in
//! the readable form used for display and storage (`Dec 25 2023 23:59:59`).
//! Both format strings live here so the two-format contract cannot drift.

use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

/// Date format accepted by commands.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date format used for display and for the persisted file.
pub const STORED_DATE_FORMAT: &str = "%b %d %Y %H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task must have a name")]
    EmptyName,

    #[error("Invalid datetime input! Input in yyyy-mm-ddTHH:mm:ss format")]
    InvalidDate,
}

/// Variant-specific payload of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { due_at: NaiveDateTime },
    Event { start_at: NaiveDateTime, end_at: NaiveDateTime },
}

impl TaskKind {
    /// Single-letter tag used in the persisted file
    pub fn type_letter(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    /// Human-readable variant name used in confirmations
    pub fn type_name(&self) -> &'static str {
        match self {
            TaskKind::Todo => "Todo",
            TaskKind::Deadline { .. } => "Deadline",
            TaskKind::Event { .. } => "Event",
        }
    }
}

/// A single tracked task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    name: String,
    done: bool,
    tags: Vec<String>,
    kind: TaskKind,
}

impl Task {
    fn new(name: impl Into<String>, kind: TaskKind) -> Result<Self, TaskError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }
        Ok(Self {
            name,
            done: false,
            tags: Vec::new(),
            kind,
        })
    }

    /// Creates a plain todo task
    pub fn todo(name: impl Into<String>) -> Result<Self, TaskError> {
        Self::new(name, TaskKind::Todo)
    }

    /// Creates a deadline task; `due` must be an ISO datetime
    pub fn deadline(name: impl Into<String>, due: &str) -> Result<Self, TaskError> {
        let due_at = parse_input_date(due)?;
        Self::new(name, TaskKind::Deadline { due_at })
    }

    /// Creates an event task; both dates must be ISO datetimes
    pub fn event(name: impl Into<String>, start: &str, end: &str) -> Result<Self, TaskError> {
        let start_at = parse_input_date(start)?;
        let end_at = parse_input_date(end)?;
        Self::new(name, TaskKind::Event { start_at, end_at })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Marks the task done; idempotent
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Marks the task not done; idempotent
    pub fn unmark_done(&mut self) {
        self.done = false;
    }

    /// Adds a tag; no-op on blanks and duplicates. Returns whether the
    /// tag set changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag; no-op if absent. Returns whether the tag set changed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let len_before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != len_before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Removes every tag and returns them in their original order
    pub fn clear_tags(&mut self) -> Vec<String> {
        std::mem::take(&mut self.tags)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.done { "X" } else { " " };
        write!(
            f,
            "[{}][{}] {}",
            self.kind.type_letter(),
            marker,
            self.name
        )?;
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { due_at } => {
                write!(f, " (by: {})", due_at.format(STORED_DATE_FORMAT))?;
            }
            TaskKind::Event { start_at, end_at } => {
                write!(
                    f,
                    " (from: {} to: {})",
                    start_at.format(STORED_DATE_FORMAT),
                    end_at.format(STORED_DATE_FORMAT)
                )?;
            }
        }
        for tag in &self.tags {
            write!(f, " #{}", tag)?;
        }
        Ok(())
    }
}

/// Parses an ISO datetime argument (`yyyy-MM-ddTHH:mm:ss`, no timezone)
pub fn parse_input_date(s: &str) -> Result<NaiveDateTime, TaskError> {
    NaiveDateTime::parse_from_str(s, INPUT_DATE_FORMAT).map_err(|_| TaskError::InvalidDate)
}
