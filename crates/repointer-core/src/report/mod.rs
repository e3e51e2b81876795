//! Run report.
//!
//! A [`RunLog`] collects every line of the audit trail in order and is
//! written to the report file once, at the end of the run. Lines can
//! also be mirrored to an interactive console; quiet runs have no console.

mod format;
mod json;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use owo_colors::OwoColorize;

use crate::error::Result;

pub use format::*;
pub use json::*;

/// Report file written to the working directory by default.
pub const DEFAULT_REPORT_FILE: &str = "global_repointer_log.txt";

pub struct RunLog {
    lines: Vec<String>,
    console: Option<Box<dyn Write>>,
}

impl RunLog {
    /// Log mirrored to stdout unless `quiet`.
    pub fn new(quiet: bool) -> Self {
        if quiet {
            Self::silent()
        } else {
            Self::with_console(Box::new(io::stdout()))
        }
    }

    pub fn with_console(console: Box<dyn Write>) -> Self {
        Self {
            lines: Vec::new(),
            console: Some(console),
        }
    }

    pub fn silent() -> Self {
        Self {
            lines: Vec::new(),
            console: None,
        }
    }

    /// Add a line to the report only.
    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Add a line to the report and mirror it to the console.
    pub fn echo(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.print(&line);
        self.lines.push(line);
    }

    /// Print to the console without recording.
    pub fn note(&mut self, line: impl AsRef<str>) {
        self.print(line.as_ref());
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        let line = format!("WARNING: {}", line.into());
        let colored = line.yellow().to_string();
        self.print(&colored);
        self.lines.push(line);
    }

    pub fn error(&mut self, line: impl Into<String>) {
        let line = format!("ERROR: {}", line.into());
        let colored = line.red().to_string();
        self.print(&colored);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write all recorded lines to `path`, replacing any previous report.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut content = String::new();
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn print(&mut self, line: &str) {
        if let Some(console) = self.console.as_mut() {
            // Console mirroring is best effort
            let _ = writeln!(console, "{}", line);
        }
    }
}
