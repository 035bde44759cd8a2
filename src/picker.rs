//! External picker integration.
//!
//! Each display line is written to the picker's stdin as `<index>\t<line>`.
//! The picker owns the terminal through its inherited stderr and prints the
//! chosen input line back on stdout; the leading index identifies the entry,
//! so identical display lines stay distinguishable.

use std::io::{ErrorKind, Write};
use std::process::Stdio;
use std::thread;

use crate::core::{shell_command, Error, Result};

/// Picker used when none is configured. Shows the display line only.
pub const DEFAULT_PICKER: &str = r"fzf --delimiter '\t' --with-nth 2..";

/// Separates the entry index from the display line.
const FIELD_SEPARATOR: char = '\t';

/// Exit codes fzf-style pickers use for "nothing chosen" and "interrupted".
const CANCEL_EXIT_CODES: [i32; 2] = [1, 130];

/// An external line picker, run through the platform shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    command: String,
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(DEFAULT_PICKER)
    }
}

impl Picker {
    /// Create a picker from a shell command line, e.g. `fzf --height 40%`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The shell command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Offer `lines` to the picker and return the index of the chosen line.
    ///
    /// Exit codes 1 and 130, or an empty choice, mean the user backed out and
    /// yield [`Error::SelectionCanceled`].
    pub fn pick<S: AsRef<str>>(&self, lines: &[S]) -> Result<usize> {
        tracing::debug!(picker = %self.command, lines = lines.len(), "Starting picker");

        let mut child = shell_command(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.error(e.to_string()))?;

        let input: String = lines
            .iter()
            .enumerate()
            .map(|(index, line)| format!("{index}{FIELD_SEPARATOR}{}\n", line.as_ref()))
            .collect();

        // Feed stdin while stdout is drained below
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || match stdin.write_all(input.as_bytes()) {
                // The picker may exit before reading everything
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                result => result,
            })
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| self.error("stdin writer panicked".to_string()))?
                .map_err(|e| self.error(e.to_string()))?;
        }

        match output.status.code() {
            Some(0) => {}
            Some(code) if CANCEL_EXIT_CODES.contains(&code) => return Err(Error::SelectionCanceled),
            Some(code) => return Err(self.error(format!("exited with status {code}"))),
            None => return Err(Error::SelectionCanceled),
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let Some(choice) = stdout.lines().find(|line| !line.trim().is_empty()) else {
            return Err(Error::SelectionCanceled);
        };

        let index = parse_choice(choice, lines.len());
        index.ok_or_else(|| self.error(format!("unrecognized choice {choice:?}")))
    }

    fn error(&self, message: String) -> Error {
        Error::Picker {
            program: self.command.clone(),
            message,
        }
    }
}

/// Read the entry index from a line the picker printed.
fn parse_choice(choice: &str, count: usize) -> Option<usize> {
    let index = choice.trim_start().split(FIELD_SEPARATOR).next()?;
    let index: usize = index.trim().parse().ok()?;
    (index < count).then_some(index)
}
