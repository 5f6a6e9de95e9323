use std::{
    ffi::OsStr,
    io::{BufRead, BufReader},
    process::{Command, Stdio},
};
use thiserror::Error;
use log::{debug, info};

use crate::toolchain::ToolchainCmd;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Command execution failed: {0}")]
    CommandFailed(#[from] std::io::Error),

    #[error("Command '{0}' failed with status: {1}")]
    CommandStatusError(String, i32),
}

/// Runs toolchain commands. The system implementation spawns processes;
/// tests substitute canned output.
pub trait CommandRunner {
    /// Runs the command to completion and returns its standard output.
    fn output(&self, cmd: &ToolchainCmd) -> Result<String, ExecuteError>;

    /// Runs the command, forwarding its standard output to the log.
    fn run(&self, cmd: &ToolchainCmd) -> Result<(), ExecuteError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, cmd: &ToolchainCmd) -> Result<String, ExecuteError> {
        command_output(cmd.executable(), cmd.args())
    }

    fn run(&self, cmd: &ToolchainCmd) -> Result<(), ExecuteError> {
        execute_command(cmd.executable(), cmd.args())
    }
}

pub fn command_output<I, S>(cmd: &str, args: I) -> Result<String, ExecuteError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(cmd).args(args).output()?;
    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        debug!("{} stderr: {}", cmd, String::from_utf8_lossy(&output.stderr).trim());
        return Err(ExecuteError::CommandStatusError(cmd.to_string(), code));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

pub fn execute_command<I, S>(cmd: &str, args: I) -> Result<(), ExecuteError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(cmd);
    command.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    run_command(&mut command, cmd)
}

fn run_command(command: &mut Command, cmd_name: &str) -> Result<(), ExecuteError> {
    let mut child = command.spawn()?;

    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines() {
            let line = line?;
            info!("{}", line);
        }
    }

    let status = child.wait()?;

    if status.success() {
        Ok(())
    } else {
        let code = status.code().unwrap_or(-1);
        Err(ExecuteError::CommandStatusError(cmd_name.to_string(), code))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_captures_stdout() {
        let output = command_output("echo", ["3.1.200"]).unwrap();
        assert_eq!(output.trim(), "3.1.200");
    }

    #[test]
    fn test_command_output_non_zero_exit() {
        let result = command_output("false", Vec::<String>::new());
        assert!(matches!(
            result,
            Err(ExecuteError::CommandStatusError(cmd, 1)) if cmd == "false"
        ));
    }

    #[test]
    fn test_missing_executable() {
        let result = execute_command("dotbuild-no-such-binary", ["--version"]);
        assert!(matches!(result, Err(ExecuteError::CommandFailed(_))));
    }

    #[test]
    fn test_execute_command_non_utf8_output() {
        let result = execute_command("printf", ["\\377\\n"]);
        assert!(matches!(result, Err(ExecuteError::CommandFailed(_))));
    }

    #[test]
    fn test_execute_command_status() {
        assert!(execute_command("true", Vec::<String>::new()).is_ok());
        assert!(matches!(
            execute_command("false", Vec::<String>::new()),
            Err(ExecuteError::CommandStatusError(_, 1))
        ));
    }
}
