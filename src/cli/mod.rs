//! Command-line interface
//!
//! The outer process surface: argument parsing (`--file`, `--format`,
//! `--verbose`), the interactive line loop, and reply printing. The inner
//! command language (`todo ...`, `mark 2`, ...) lives in [`crate::parse`].

mod app;
mod output;

pub use app::{run, run_repl, Cli};
pub use output::{Output, OutputFormat};
