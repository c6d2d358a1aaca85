//! Command dispatch and the interactive loop
//!
//! A [`Session`] owns the task list and its store: it parses one command
//! line, applies the mutation, persists the whole list, and produces the
//! reply text. Every user-input error is converted to a single-line
//! message here; the session never terminates on bad input. The loop that
//! feeds lines in lives with the presentation layer
//! ([`crate::cli::run_repl`]).

use thiserror::Error;

use crate::domain::{ListError, Task, TaskError, TaskList};
use crate::parse::{self, ParseError, SearchQuery, TagAction, UntagTarget};
use crate::render;
use crate::storage::TaskStore;

/// Any way a command can fail on user input. Converted to a one-line
/// error echo at the dispatch boundary.
#[derive(Debug, Error, PartialEq, Eq)]
enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    List(#[from] ListError),
}

/// Outcome of one command line
#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// False when the text is an error echo or the invalid-command notice
    pub ok: bool,
    /// Save-failure report, shown out of band; the session keeps running
    pub warning: Option<String>,
    pub exit: bool,
}

impl Reply {
    fn of(text: String) -> Self {
        Self {
            text,
            ok: true,
            warning: None,
            exit: false,
        }
    }

    fn rejected(text: String) -> Self {
        Self {
            ok: false,
            ..Self::of(text)
        }
    }
}

/// Diagnostics gathered while opening a session
#[derive(Debug, Default)]
pub struct OpenReport {
    /// Messages the user should always see (load failure, skipped lines)
    pub warnings: Vec<String>,
    /// Verbose-only notices (created directories/files)
    pub notices: Vec<String>,
}

/// One interactive tracking session over a task store
pub struct Session {
    tasks: TaskList,
    store: TaskStore,
}

impl Session {
    /// Loads the store and reports what happened. A failed load degrades
    /// to an empty list; the session starts either way.
    pub fn open(store: TaskStore) -> (Self, OpenReport) {
        let mut report = OpenReport::default();
        let tasks = match store.load() {
            Ok(outcome) => {
                report.notices = outcome.notices;
                for line in &outcome.skipped {
                    report.warnings.push(render::corrupted_line(line));
                }
                outcome.tasks
            }
            Err(_) => {
                report.warnings.push(render::loading_error());
                TaskList::new()
            }
        };
        (Self { tasks, store }, report)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Handles one command line and returns the reply to display
    pub fn respond(&mut self, line: &str) -> Reply {
        match self.dispatch(line) {
            Ok(reply) => reply,
            Err(e) => Reply::rejected(render::error(&e.to_string())),
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Reply, CommandError> {
        let Some(word) = parse::command_word(line) else {
            return Ok(Reply::rejected(render::invalid_command()));
        };
        match word {
            "bye" => Ok(Reply {
                exit: true,
                ..Reply::of(render::goodbye())
            }),
            "list" => Ok(Reply::of(render::task_list(&self.tasks))),
            "todo" => self.handle_todo(line),
            "deadline" => self.handle_deadline(line),
            "event" => self.handle_event(line),
            "mark" => self.handle_mark(line, true),
            "unmark" => self.handle_mark(line, false),
            "delete" => self.handle_delete(line),
            "find" => self.handle_find(line),
            "search" => self.handle_search(line),
            "tag" => self.handle_tag(line),
            "untag" => self.handle_untag(line),
            _ => Ok(Reply::rejected(render::invalid_command())),
        }
    }

    fn handle_todo(&mut self, line: &str) -> Result<Reply, CommandError> {
        let (name, tags) = parse::parse_todo(line)?;
        self.add_task(Task::todo(name)?, &tags)
    }

    fn handle_deadline(&mut self, line: &str) -> Result<Reply, CommandError> {
        let (name, tags, due) = parse::parse_deadline(line)?;
        self.add_task(Task::deadline(name, &due)?, &tags)
    }

    fn handle_event(&mut self, line: &str) -> Result<Reply, CommandError> {
        let (name, tags, start, end) = parse::parse_event(line)?;
        self.add_task(Task::event(name, &start, &end)?, &tags)
    }

    fn add_task(&mut self, mut task: Task, tags: &[String]) -> Result<Reply, CommandError> {
        for tag in tags {
            task.add_tag(tag);
        }
        let text = render::task_added(&task, self.tasks.len() + 1);
        self.tasks.add(task);
        Ok(self.done_after_mutation(text))
    }

    fn handle_mark(&mut self, line: &str, done: bool) -> Result<Reply, CommandError> {
        let index = self.index_from(line)?;
        let text = if done {
            render::task_marked(self.tasks.mark(index)?)
        } else {
            render::task_unmarked(self.tasks.unmark(index)?)
        };
        Ok(self.done_after_mutation(text))
    }

    fn handle_delete(&mut self, line: &str) -> Result<Reply, CommandError> {
        let index = self.index_from(line)?;
        let removed = self.tasks.delete(index)?;
        let text = render::task_deleted(&removed, self.tasks.len());
        Ok(self.done_after_mutation(text))
    }

    fn handle_find(&mut self, line: &str) -> Result<Reply, CommandError> {
        let text = parse::parse_task_name(line, "find")?;
        Ok(Reply::of(render::find_results(
            &self.tasks.find_by_text(&text),
        )))
    }

    fn handle_search(&mut self, line: &str) -> Result<Reply, CommandError> {
        let query = parse::parse_search(line)?;
        let hits = match &query {
            SearchQuery::Text(text) => self.tasks.find_by_text(text),
            SearchQuery::Tag(tag) => self.tasks.find_by_tag(tag),
        };
        Ok(Reply::of(render::search_results(
            &hits,
            &query.display_term(),
        )))
    }

    fn handle_tag(&mut self, line: &str) -> Result<Reply, CommandError> {
        let cmd = parse::parse_tag_command(line)?;
        let index = zero_based(cmd.number, self.tasks.len())?;
        let task = self.tasks.get_mut(index)?;
        let text = match cmd.action {
            TagAction::Add => {
                task.add_tag(&cmd.tag);
                render::tag_added(task, &cmd.tag)
            }
            TagAction::Remove => {
                if task.remove_tag(&cmd.tag) {
                    render::tag_removed(task, &cmd.tag)
                } else {
                    render::tag_not_found(task, &cmd.tag)
                }
            }
        };
        Ok(self.done_after_mutation(text))
    }

    fn handle_untag(&mut self, line: &str) -> Result<Reply, CommandError> {
        let (number, target) = parse::parse_untag_command(line)?;
        let index = zero_based(number, self.tasks.len())?;
        let task = self.tasks.get_mut(index)?;
        let text = match target {
            UntagTarget::All => {
                let removed = task.clear_tags();
                render::all_tags_removed(task, &removed)
            }
            UntagTarget::Tags(tags) => {
                let mut removed = Vec::new();
                let mut missing = Vec::new();
                for tag in tags {
                    if task.remove_tag(&tag) {
                        removed.push(tag);
                    } else {
                        missing.push(tag);
                    }
                }
                render::untag_result(task, &removed, &missing)
            }
        };
        Ok(self.done_after_mutation(text))
    }

    fn index_from(&self, line: &str) -> Result<usize, CommandError> {
        let number = parse::parse_task_number(line)?;
        Ok(zero_based(number, self.tasks.len())?)
    }

    /// Persists after a mutation and folds any save failure into the reply
    fn done_after_mutation(&self, text: String) -> Reply {
        let warning = self
            .store
            .save(&self.tasks)
            .err()
            .map(|e| format!("Error while writing file: {:#}", e));
        Reply {
            warning,
            ..Reply::of(text)
        }
    }
}

/// Converts a 1-based task number to a checked 0-based index
fn zero_based(number: i64, len: usize) -> Result<usize, ListError> {
    if number < 1 || number as u64 > len as u64 {
        return Err(ListError::OutOfRange);
    }
    Ok((number - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        let store = TaskStore::new(dir.path().join("jake.txt"));
        Session::open(store).0
    }

    fn reload(dir: &TempDir) -> TaskList {
        TaskStore::new(dir.path().join("jake.txt"))
            .load()
            .unwrap()
            .tasks
    }

    #[test]
    fn todo_command_adds_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.respond("todo buy milk");
        assert!(reply.ok);
        assert!(reply.warning.is_none());
        assert_eq!(
            reply.text,
            "Todo task has been added:\n[T][ ] buy milk\nNow you have 1 tasks in the list."
        );
        assert_eq!(reload(&dir).len(), 1);
    }

    #[test]
    fn deadline_and_event_commands_carry_their_dates() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.respond("deadline report /2023-12-25T23:59:59");
        assert!(reply.text.contains("[D][ ] report (by: Dec 25 2023 23:59:59)"));

        let reply = session.respond("event standup /2023-12-25T10:00:00 /2023-12-25T10:15:00");
        assert!(reply
            .text
            .contains("[E][ ] standup (from: Dec 25 2023 10:00:00 to: Dec 25 2023 10:15:00)"));
        assert_eq!(reload(&dir).len(), 2);
    }

    #[test]
    fn mark_then_unmark_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo read book");

        let reply = session.respond("mark 1");
        assert_eq!(
            reply.text,
            "Nice! I've marked this task as done:\n[T][X] read book"
        );
        let reply = session.respond("unmark 1");
        assert_eq!(
            reply.text,
            "OK, I've marked this task as not done yet:\n[T][ ] read book"
        );
        assert!(!session.tasks().get(0).unwrap().is_done());
    }

    #[test]
    fn out_of_range_numbers_echo_an_error_and_mutate_nothing() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo only");

        for cmd in ["delete 2", "mark 0", "unmark -1", "delete 99"] {
            let reply = session.respond(cmd);
            assert!(!reply.ok, "{} should be rejected", cmd);
            assert_eq!(reply.text, "Error: Invalid task number!");
        }
        assert_eq!(session.tasks().len(), 1);
    }

    #[test]
    fn malformed_numbers_echo_the_format_error() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.respond("mark first");
        assert_eq!(reply.text, "Error: Invalid task number format!");
        let reply = session.respond("delete");
        assert_eq!(reply.text, "Error: Please specify a task number!");
    }

    #[test]
    fn delete_reports_the_removed_task_and_new_count() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo first");
        session.respond("todo second");

        let reply = session.respond("delete 1");
        assert_eq!(
            reply.text,
            "Noted. I've removed this task:\n[T][ ] first\nNow you have 1 tasks in the list."
        );
        assert_eq!(reload(&dir).len(), 1);
    }

    #[test]
    fn find_matches_substrings_case_sensitively() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo buy milk");
        session.respond("todo sell bread");

        let reply = session.respond("find milk");
        assert_eq!(
            reply.text,
            "Here are the matching tasks in your list:\n1. [T][ ] buy milk"
        );
        let reply = session.respond("find Milk");
        assert_eq!(reply.text, "No matching tasks found in your list.");
    }

    #[test]
    fn search_by_tag_and_by_text() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo buy milk #grocery");
        session.respond("todo call mom");

        let reply = session.respond("search #grocery");
        assert_eq!(
            reply.text,
            "Here are the tasks matching '#grocery':\n1. [T][ ] buy milk #grocery"
        );
        let reply = session.respond("search call");
        assert_eq!(
            reply.text,
            "Here are the tasks matching 'call':\n1. [T][ ] call mom"
        );
        let reply = session.respond("search #nothing");
        assert_eq!(reply.text, "No tasks found matching '#nothing'.");
    }

    #[test]
    fn inline_tags_are_stripped_from_the_name_and_attached() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        session.respond("todo buy milk #grocery #urgent");
        let task = session.tasks().get(0).unwrap();
        assert_eq!(task.name(), "buy milk");
        assert_eq!(task.tags(), ["grocery", "urgent"]);

        let persisted = reload(&dir);
        assert_eq!(persisted.get(0).unwrap().tags(), ["grocery", "urgent"]);
    }

    #[test]
    fn tag_command_adds_and_removes_one_tag() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo buy milk");

        let reply = session.respond("tag 1 add grocery");
        assert_eq!(
            reply.text,
            "Tag 'grocery' added to task:\n[T][ ] buy milk #grocery"
        );
        let reply = session.respond("tag 1 remove grocery");
        assert_eq!(
            reply.text,
            "Tag 'grocery' removed from task:\n[T][ ] buy milk"
        );
        let reply = session.respond("tag 1 remove grocery");
        assert_eq!(
            reply.text,
            "Tag 'grocery' not found on task:\n[T][ ] buy milk"
        );
    }

    #[test]
    fn untag_all_clears_every_tag() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo buy milk #a #b");

        let reply = session.respond("untag 1 all");
        assert_eq!(
            reply.text,
            "All tags removed from task:\nRemoved tags: a, b\nUpdated task: [T][ ] buy milk"
        );
        assert!(reload(&dir).get(0).unwrap().tags().is_empty());
    }

    #[test]
    fn untag_list_reports_hits_and_misses() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.respond("todo buy milk #a");

        let reply = session.respond("untag 1 a b");
        assert_eq!(
            reply.text,
            "Removed tags: a\nTags not found: b\nUpdated task: [T][ ] buy milk"
        );
    }

    #[test]
    fn unknown_and_empty_commands_are_invalid() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.respond("frobnicate 7");
        assert!(!reply.ok);
        assert_eq!(reply.text, "Invalid task!!! Try another one");
        let reply = session.respond("");
        assert_eq!(reply.text, "Invalid task!!! Try another one");
    }

    #[test]
    fn bye_replies_goodbye_and_exits() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.respond("bye");
        assert!(reply.exit);
        assert_eq!(reply.text, "Bye. Hope to see you again soon!");
    }

    #[test]
    fn parse_errors_echo_their_message_and_continue() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);

        let reply = session.respond("todo   ");
        assert_eq!(reply.text, "Error: Todo task must have a name");
        let reply = session.respond("deadline homework tomorrow");
        assert_eq!(
            reply.text,
            "Error: Deadline task must have a valid name and/or date!"
        );
        let reply = session.respond("deadline homework /tomorrow");
        assert_eq!(
            reply.text,
            "Error: Invalid datetime input! Input in yyyy-mm-ddTHH:mm:ss format"
        );
        // the session is still usable afterwards
        assert!(session.respond("todo recover").ok);
    }

    #[test]
    fn open_reports_corrupted_lines_and_keeps_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jake.txt");
        std::fs::write(&path, "T | 0 | good | \nbroken record\n").unwrap();

        let (session, report) = Session::open(TaskStore::new(&path));
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(
            report.warnings,
            ["Corrupted line ignored: broken record"]
        );
    }
}
