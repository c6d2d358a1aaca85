//! Main CLI application structure

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::output::{Output, OutputFormat};
use crate::render;
use crate::session::Session;
use crate::storage::TaskStore;

#[derive(Parser)]
#[command(name = "jake")]
#[command(author, version, about = "Single-user task tracker with a line-command interface")]
pub struct Cli {
    /// Path to the task save file
    #[arg(long, default_value = "./data/jake.txt")]
    pub file: PathBuf,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose(&format!("using save file {}", cli.file.display()));

    let (session, report) = Session::open(TaskStore::new(&cli.file));
    for notice in &report.notices {
        output.verbose(notice);
    }
    for warning in &report.warnings {
        output.warn(warning);
    }

    let stdin = io::stdin();
    run_repl(session, stdin.lock(), &output)
}

/// Drives a session from `input` until `bye` or end of input. The caller
/// picks the input source; nothing here reaches for a global reader.
pub fn run_repl<R: BufRead>(mut session: Session, input: R, output: &Output) -> Result<()> {
    output.banner(&render::welcome());
    for line in input.lines() {
        let line = line.context("Failed to read command input")?;
        let reply = session.respond(&line);
        output.reply(&reply);
        if reply.exit {
            break;
        }
    }
    Ok(())
}
