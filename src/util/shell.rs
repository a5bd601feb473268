//! Status line output for the CLI.
//!
//! Commands report progress as `{status:>12} {message}` on stderr, with
//! the status word colored when stderr is a terminal and `--no-color`
//! was not given.

use std::fmt::Display;
use std::io::{self, IsTerminal};

/// Status word printed in front of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success (green)
    Added,
    Created,
    Generated,
    Checked,
    Finished,

    // Unchanged or ignored (yellow)
    Fresh,
    Skipped,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Added => "Added",
            Status::Created => "Created",
            Status::Generated => "Generated",
            Status::Checked => "Checked",
            Status::Finished => "Finished",
            Status::Fresh => "Fresh",
            Status::Skipped => "Skipped",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Added
            | Status::Created
            | Status::Generated
            | Status::Checked
            | Status::Finished => "\x1b[1;32m",
            Status::Fresh | Status::Skipped => "\x1b[1;33m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Prints status lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Shell {
    use_color: bool,
}

impl Shell {
    /// Color is used only when allowed and stderr is a terminal.
    pub fn new(color: bool) -> Self {
        Shell {
            use_color: color && io::stderr().is_terminal(),
        }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print `{status:>12} {message}`.
    pub fn status(&self, status: Status, msg: impl Display) {
        eprintln!("{} {}", self.format_status(status), msg);
    }

    fn format_status(&self, status: Status) -> String {
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                status.as_str(),
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", status.as_str(), width = STATUS_WIDTH)
        }
    }
}
