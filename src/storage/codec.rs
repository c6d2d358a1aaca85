//! Line codec for the persisted task file
//!
//! `encode` writes `<letter> | <flag> | <name> | <variant dates...> | <tags>`;
//! `decode` reverses it. Decoding never panics and never partially
//! succeeds: any malformed field turns the whole line into a
//! [`CodecError`] for the caller to skip.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{Task, TaskError, TaskKind, INPUT_DATE_FORMAT, STORED_DATE_FORMAT};

/// Field separator of the persisted format
pub const FIELD_SEPARATOR: &str = " | ";

/// A record that cannot be decoded. Contained within the storage layer;
/// the user only ever sees the skipped-line report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown task type '{0}'")]
    UnknownType(String),

    #[error("wrong field count {0}")]
    FieldCount(usize),

    #[error("unreadable done flag '{0}'")]
    BadDoneFlag(String),

    #[error("unreadable date '{0}'")]
    BadDate(String),

    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Encodes one task as one line, without trailing newline
pub fn encode(task: &Task) -> String {
    let mut fields = vec![
        task.kind().type_letter().to_string(),
        if task.is_done() { "1" } else { "0" }.to_string(),
        task.name().to_string(),
    ];
    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { due_at } => {
            fields.push(stored_date(due_at));
        }
        TaskKind::Event { start_at, end_at } => {
            fields.push(stored_date(start_at));
            fields.push(stored_date(end_at));
        }
    }
    fields.push(task.tags().join(","));
    fields.join(FIELD_SEPARATOR)
}

/// Decodes one line back into a task
pub fn decode(line: &str) -> Result<Task, CodecError> {
    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if parts.len() < 3 {
        return Err(CodecError::FieldCount(parts.len()));
    }
    let type_letter = parts[0].trim();
    let done = parse_done_flag(parts[1].trim())?;
    let name = parts[2].trim();

    let mut task = match type_letter {
        "T" => {
            expect_fields(&parts, 3)?;
            Task::todo(name)?
        }
        "D" => {
            expect_fields(&parts, 4)?;
            Task::deadline(name, &stored_to_input(parts[3].trim())?)?
        }
        "E" => {
            expect_fields(&parts, 5)?;
            Task::event(
                name,
                &stored_to_input(parts[3].trim())?,
                &stored_to_input(parts[4].trim())?,
            )?
        }
        other => return Err(CodecError::UnknownType(other.to_string())),
    };

    if done {
        task.mark_done();
    }
    if let Some(tags) = parts.get(expected_base_fields(type_letter)) {
        for tag in tags.split(',') {
            task.add_tag(tag);
        }
    }
    Ok(task)
}

fn expected_base_fields(type_letter: &str) -> usize {
    match type_letter {
        "D" => 4,
        "E" => 5,
        _ => 3,
    }
}

/// Accepts the base field count or base + 1 (the trailing tag field)
fn expect_fields(parts: &[&str], base: usize) -> Result<(), CodecError> {
    if parts.len() == base || parts.len() == base + 1 {
        Ok(())
    } else {
        Err(CodecError::FieldCount(parts.len()))
    }
}

fn parse_done_flag(field: &str) -> Result<bool, CodecError> {
    match field {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(CodecError::BadDoneFlag(other.to_string())),
    }
}

fn stored_date(date: &NaiveDateTime) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}

/// Converts a stored display-format date back into the ISO input shape, so
/// task construction re-validates it the same way it validates typed input
fn stored_to_input(field: &str) -> Result<String, CodecError> {
    let date = NaiveDateTime::parse_from_str(field, STORED_DATE_FORMAT)
        .map_err(|_| CodecError::BadDate(field.to_string()))?;
    Ok(date.format(INPUT_DATE_FORMAT).to_string())
}
