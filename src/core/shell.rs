//! Platform shell invocation.

use std::process::Command as ProcessCommand;

/// Get the shell and flag for running a command line.
pub fn get_shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

/// Build a process that runs `command_line` through the platform shell.
pub fn shell_command(command_line: &str) -> ProcessCommand {
    let (shell, flag) = get_shell();
    let mut command = ProcessCommand::new(shell);
    command.arg(flag).arg(command_line);
    command
}
