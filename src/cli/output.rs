//! Reply printing for the interactive session

use serde::Serialize;

use crate::session::Reply;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Separator line framing every reply in text mode
const SEPARATOR: &str = "____________________________________________________________";

#[derive(Serialize)]
struct ReplyPayload<'a> {
    success: bool,
    message: &'a str,
}

/// Output helper: text replies are framed with separator lines, JSON
/// replies come out one object per line
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints the opening banner (text mode only)
    pub fn banner(&self, text: &str) {
        if self.format == OutputFormat::Text {
            println!("{}", text);
            println!("{}", SEPARATOR);
        }
    }

    /// Prints one command reply
    pub fn reply(&self, reply: &Reply) {
        match self.format {
            OutputFormat::Text => {
                println!("{}", SEPARATOR);
                println!("{}", reply.text);
                println!("{}", SEPARATOR);
            }
            OutputFormat::Json => {
                let payload = ReplyPayload {
                    success: reply.ok,
                    message: &reply.text,
                };
                match serde_json::to_string(&payload) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Failed to serialize reply: {}", e),
                }
            }
        }
        if let Some(warning) = &reply.warning {
            self.warn(warning);
        }
    }

    /// Prints a warning to stderr, in any format
    pub fn warn(&self, message: &str) {
        eprintln!("{}", message);
    }

    /// Prints a debug message to stderr when --verbose is set
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
