//! Jake - a single-user task tracker driven by line commands
//!
//! Jake keeps todo, deadline, and event tasks in an ordered list, persists
//! them to a flat text file after every mutation, and reads free-form
//! commands (`todo buy milk #errand`, `deadline report /2024-03-01T17:00:00`,
//! `mark 2`, ...) one line at a time.

pub mod domain;
pub mod parse;
pub mod storage;
pub mod render;
pub mod session;
pub mod cli;

pub use domain::{Task, TaskKind, TaskList};
