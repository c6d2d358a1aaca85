//! Command-line parsing rules
//!
//! Turns one raw input line into the pieces the dispatcher needs: the
//! command word, a task number, a task name with its `#tags` split out, or
//! the slash-delimited date arguments of `deadline` and `event` commands.
//!
//! The two slash-delimited commands differ deliberately: `deadline` looks
//! for the first `/` after the first space and lets a zero-length name
//! region through to the slice guard, while `event` looks for the first
//! `/` anywhere and rejects a zero-length name region up front. Both
//! funnel every malformed shape into one per-command message.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Please specify a task number!")]
    MissingTaskNumber,

    #[error("Invalid task number format!")]
    BadTaskNumber,

    #[error("{0} task must have a name")]
    MissingName(String),

    #[error("Deadline task must have a valid name and/or date!")]
    BadDeadline,

    #[error("Event task must have a valid name and/or date!")]
    BadEvent,

    #[error("Tag command must be: tag <task number> <add|remove> <tag>")]
    BadTagCommand,

    #[error("Untag command must be: untag <task number> <tag>... or untag <task number> all")]
    BadUntagCommand,

    #[error("Search term must not be empty!")]
    EmptySearchTerm,
}

/// One tag mutation requested by a `tag` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCommand {
    pub number: i64,
    pub action: TagAction,
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Add,
    Remove,
}

/// Target of an `untag` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntagTarget {
    All,
    Tags(Vec<String>),
}

/// What a `search` command looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Text(String),
    Tag(String),
}

impl SearchQuery {
    /// The term as the user typed it, for echoing in results
    pub fn display_term(&self) -> String {
        match self {
            SearchQuery::Text(t) => t.clone(),
            SearchQuery::Tag(t) => format!("#{}", t),
        }
    }
}

/// First whitespace-delimited token of the line, if any
pub fn command_word(line: &str) -> Option<&str> {
    line.split(' ').next().filter(|w| !w.is_empty())
}

/// 1-based task number from the second token. Not range-validated here;
/// zero and negative numbers pass through and fail the bounds check later.
pub fn parse_task_number(line: &str) -> Result<i64, ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 2 {
        return Err(ParseError::MissingTaskNumber);
    }
    parts[1].parse().map_err(|_| ParseError::BadTaskNumber)
}

/// Everything after the command word, trimmed
pub fn parse_task_name(line: &str, word: &str) -> Result<String, ParseError> {
    let name = line.get(word.len()..).unwrap_or("").trim();
    if name.is_empty() {
        return Err(ParseError::MissingName(capitalize(word)));
    }
    Ok(name.to_string())
}

/// Name and tags for a `todo` command
pub fn parse_todo(line: &str) -> Result<(String, Vec<String>), ParseError> {
    let name = parse_task_name(line, "todo")?;
    Ok(extract_tags(&name))
}

/// Name, tags, and date string for a `deadline` command
///
/// Shape: `deadline <name>[ #tag]* /<date>`. The name slice drops the
/// separating space before the slash.
pub fn parse_deadline(line: &str) -> Result<(String, Vec<String>, String), ParseError> {
    let begin = match line.find(' ') {
        Some(i) => i as i64 + 1,
        None => 0,
    };
    let end = match find_from(line, '/', begin) {
        Some(i) => i as i64,
        None => -1,
    };
    if begin > end {
        return Err(ParseError::BadDeadline);
    }
    let name = slice(line, begin, end - 1).ok_or(ParseError::BadDeadline)?;
    let date = slice(line, end + 1, line.len() as i64).ok_or(ParseError::BadDeadline)?;
    let (name, tags) = extract_tags(name);
    Ok((name, tags, date.to_string()))
}

/// Name, tags, and both date strings for an `event` command
///
/// Shape: `event <name>[ #tag]* /<start> /<end>`. The first slash splits the
/// name from the dates blob; a second slash inside the blob splits the two
/// dates, each slice dropping the separating space before its slash.
pub fn parse_event(line: &str) -> Result<(String, Vec<String>, String, String), ParseError> {
    let begin = match line.find(' ') {
        Some(i) => i as i64 + 1,
        None => 0,
    };
    let end = match line.find('/') {
        Some(i) => i as i64,
        None => -1,
    };
    if begin >= end {
        return Err(ParseError::BadEvent);
    }
    let name = slice(line, begin, end - 1).ok_or(ParseError::BadEvent)?;
    let dates = slice(line, end + 1, line.len() as i64).ok_or(ParseError::BadEvent)?;
    let split = dates.find('/').ok_or(ParseError::BadEvent)? as i64;
    let start = slice(dates, 0, split - 1).ok_or(ParseError::BadEvent)?;
    let end_date = slice(dates, split + 1, dates.len() as i64).ok_or(ParseError::BadEvent)?;
    let (name, tags) = extract_tags(name);
    Ok((name, tags, start.to_string(), end_date.to_string()))
}

/// `tag <n> <add|remove> <tag>`
pub fn parse_tag_command(line: &str) -> Result<TagCommand, ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 4 {
        return Err(ParseError::BadTagCommand);
    }
    let number = parts[1].parse().map_err(|_| ParseError::BadTaskNumber)?;
    let action = match parts[2] {
        "add" => TagAction::Add,
        "remove" => TagAction::Remove,
        _ => return Err(ParseError::BadTagCommand),
    };
    let tag = parts[3].trim().trim_start_matches('#');
    if tag.is_empty() {
        return Err(ParseError::BadTagCommand);
    }
    Ok(TagCommand {
        number,
        action,
        tag: tag.to_string(),
    })
}

/// `untag <n> <tag>...` or `untag <n> all`
pub fn parse_untag_command(line: &str) -> Result<(i64, UntagTarget), ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::BadUntagCommand);
    }
    let number = parts[1].parse().map_err(|_| ParseError::BadTaskNumber)?;
    if parts.len() == 3 && parts[2] == "all" {
        return Ok((number, UntagTarget::All));
    }
    let tags = parts[2..]
        .iter()
        .map(|t| t.trim_start_matches('#').to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>();
    if tags.is_empty() {
        return Err(ParseError::BadUntagCommand);
    }
    Ok((number, UntagTarget::Tags(tags)))
}

/// `search <text>` or `search #<tag>`
pub fn parse_search(line: &str) -> Result<SearchQuery, ParseError> {
    let term = line.get("search".len()..).unwrap_or("").trim();
    if term.is_empty() {
        return Err(ParseError::EmptySearchTerm);
    }
    if let Some(tag) = term.strip_prefix('#') {
        if tag.is_empty() {
            return Err(ParseError::EmptySearchTerm);
        }
        return Ok(SearchQuery::Tag(tag.to_string()));
    }
    Ok(SearchQuery::Text(term.to_string()))
}

/// Splits `#tag` tokens out of a name region.
///
/// A tag token is a whole whitespace-delimited token of the form
/// `#<alphanumeric-or-underscore run>`. Tags keep their order; the cleaned
/// name is the remaining tokens rejoined with single spaces. A region
/// without tag tokens is passed through trimmed but otherwise untouched.
pub fn extract_tags(name: &str) -> (String, Vec<String>) {
    if !name.split_whitespace().any(is_tag_token) {
        return (name.trim().to_string(), Vec::new());
    }
    let mut tags = Vec::new();
    let mut kept = Vec::new();
    for token in name.split_whitespace() {
        if is_tag_token(token) {
            tags.push(token[1..].to_string());
        } else {
            kept.push(token);
        }
    }
    (kept.join(" "), tags)
}

fn is_tag_token(token: &str) -> bool {
    match token.strip_prefix('#') {
        Some(word) => {
            !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Byte position of `needle` at or after `from`, mirroring an
/// index-from search
fn find_from(s: &str, needle: char, from: i64) -> Option<usize> {
    if from < 0 {
        return s.find(needle);
    }
    let from = from as usize;
    s.get(from..)?.find(needle).map(|i| i + from)
}

/// Checked substring: `None` on negative bounds, inverted ranges, or
/// out-of-range / non-boundary indices
fn slice(s: &str, begin: i64, end: i64) -> Option<&str> {
    if begin < 0 || end < begin {
        return None;
    }
    s.get(begin as usize..end as usize)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
