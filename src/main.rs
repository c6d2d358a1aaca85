//! Jake - a single-user task tracker driven by line commands

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = jake_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
