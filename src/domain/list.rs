//! Ordered task collection
//!
//! Insertion order is list order, display order, and persisted order. All
//! index-taking operations are bounds-checked and report a domain error
//! instead of panicking.

use thiserror::Error;

use super::task::Task;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("Invalid task number!")]
    OutOfRange,
}

/// Ordered, owning collection of tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList(Vec<Task>);

impl TaskList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self(tasks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a task to the end of the list
    pub fn add(&mut self, task: Task) {
        self.0.push(task);
    }

    /// Returns the task at `index`, or an error if out of range
    pub fn get(&self, index: usize) -> Result<&Task, ListError> {
        self.0.get(index).ok_or(ListError::OutOfRange)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task, ListError> {
        self.0.get_mut(index).ok_or(ListError::OutOfRange)
    }

    /// Removes and returns the task at `index`
    pub fn delete(&mut self, index: usize) -> Result<Task, ListError> {
        if index >= self.0.len() {
            return Err(ListError::OutOfRange);
        }
        Ok(self.0.remove(index))
    }

    /// Marks the task at `index` done and returns it
    pub fn mark(&mut self, index: usize) -> Result<&Task, ListError> {
        let task = self.get_mut(index)?;
        task.mark_done();
        Ok(task)
    }

    /// Marks the task at `index` not done and returns it
    pub fn unmark(&mut self, index: usize) -> Result<&Task, ListError> {
        let task = self.get_mut(index)?;
        task.unmark_done();
        Ok(task)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.0.iter()
    }

    /// Tasks whose name contains `text` literally, in list order
    pub fn find_by_text(&self, text: &str) -> TaskList {
        Self(
            self.0
                .iter()
                .filter(|t| t.name().contains(text))
                .cloned()
                .collect(),
        )
    }

    /// Tasks carrying exactly the tag `tag`, in list order
    pub fn find_by_tag(&self, tag: &str) -> TaskList {
        Self(self.0.iter().filter(|t| t.has_tag(tag)).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
