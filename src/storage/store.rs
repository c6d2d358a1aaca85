//! Flat-file task store
//!
//! Loads and saves the whole task list. Loading is best-effort: the parent
//! directory and save file are created when missing, corrupted lines are
//! skipped and reported, and an unreadable file surfaces as an error the
//! session downgrades to an empty list. Saving rewrites the file through a
//! temp file + rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::codec;
use crate::domain::TaskList;

/// Store for the task file
pub struct TaskStore {
    path: PathBuf,
}

/// Result of a load: the surviving tasks plus diagnostics for the
/// presentation layer
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tasks: TaskList,
    /// Raw lines that failed to decode, in file order
    pub skipped: Vec<String>,
    /// Bootstrap notices (created directories/files), verbose-only
    pub notices: Vec<String>,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every task from the file, skipping lines that fail to decode.
    ///
    /// A missing file is created (best effort) and loads as an empty list.
    /// Only an existing-but-unreadable file returns an error.
    pub fn load(&self) -> Result<LoadOutcome> {
        let mut outcome = LoadOutcome::default();
        self.ensure_exists(&mut outcome.notices);

        if !self.path.exists() {
            return Ok(outcome);
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open save file: {}", self.path.display()))?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line
                .with_context(|| format!("Failed to read save file: {}", self.path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            match codec::decode(&line) {
                Ok(task) => outcome.tasks.add(task),
                Err(_) => outcome.skipped.push(line),
            }
        }
        Ok(outcome)
    }

    /// Overwrites the file with the encoded form of every task, in list
    /// order. The in-memory list stays authoritative if this fails.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let temp_path = self.path.with_extension("txt.tmp");
        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
            let mut writer = BufWriter::new(file);
            for task in tasks {
                writeln!(writer, "{}", codec::encode(task)).context("Failed to write task")?;
            }
            writer.flush().context("Failed to flush save file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }

    /// Creates the parent directory and an empty save file when absent.
    /// Failures are swallowed; the subsequent open decides what is fatal.
    fn ensure_exists(&self, notices: &mut Vec<String>) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                match fs::create_dir_all(parent) {
                    Ok(()) => notices.push(format!("Created directory: {}", parent.display())),
                    Err(e) => notices.push(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    )),
                }
            }
        }
        if !self.path.exists() {
            match OpenOptions::new().write(true).create_new(true).open(&self.path) {
                Ok(_) => notices.push(format!("Created new save file: {}", self.path.display())),
                Err(e) => notices.push(format!(
                    "Failed to create file {}: {}",
                    self.path.display(),
                    e
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use std::fs;
    use tempfile::TempDir;

    fn sample_list() -> TaskList {
        let mut list = TaskList::new();
        list.add(Task::todo("buy milk").unwrap());
        let mut deadline = Task::deadline("report", "2023-12-25T23:59:59").unwrap();
        deadline.mark_done();
        deadline.add_tag("work");
        list.add(deadline);
        list
    }

    #[test]
    fn load_missing_file_yields_empty_list_and_creates_it() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("data").join("jake.txt"));

        let outcome = store.load().unwrap();
        assert!(outcome.tasks.is_empty());
        assert!(outcome.skipped.is_empty());
        assert!(store.path().exists());
        assert_eq!(outcome.notices.len(), 2);
    }

    #[test]
    fn save_then_load_round_trips_the_list() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("jake.txt"));

        let list = sample_list();
        store.save(&list).unwrap();

        let outcome = store.load().unwrap();
        assert_eq!(outcome.tasks, list);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("nested").join("deep").join("jake.txt"));

        store.save(&sample_list()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn corrupted_middle_line_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jake.txt");
        fs::write(
            &path,
            "T | 0 | first | \nthis line is garbage\nT | 1 | third | \n",
        )
        .unwrap();

        let store = TaskStore::new(&path);
        let outcome = store.load().unwrap();
        assert_eq!(outcome.tasks.len(), 2);
        assert_eq!(outcome.tasks.get(0).unwrap().name(), "first");
        assert_eq!(outcome.tasks.get(1).unwrap().name(), "third");
        assert_eq!(outcome.skipped, ["this line is garbage"]);
    }

    #[test]
    fn blank_lines_are_ignored_silently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jake.txt");
        fs::write(&path, "T | 0 | only | \n\n\n").unwrap();

        let outcome = TaskStore::new(&path).load().unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("jake.txt"));
        store.save(&sample_list()).unwrap();
        assert!(!dir.path().join("jake.txt.tmp").exists());
    }

    #[test]
    fn save_overwrites_previous_content_fully() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::new(dir.path().join("jake.txt"));

        store.save(&sample_list()).unwrap();
        let mut shorter = TaskList::new();
        shorter.add(Task::todo("only one").unwrap());
        store.save(&shorter).unwrap();

        let outcome = store.load().unwrap();
        assert_eq!(outcome.tasks.len(), 1);
        assert_eq!(outcome.tasks.get(0).unwrap().name(), "only one");
    }
}
