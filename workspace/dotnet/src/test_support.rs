use std::cell::RefCell;
use std::collections::VecDeque;

use crate::execute::{CommandRunner, ExecuteError};
use crate::toolchain::ToolchainCmd;

/// Replays canned `output` results and records every invocation.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    outputs: RefCell<VecDeque<Result<String, ExecuteError>>>,
    fail_runs: bool,
    pub(crate) calls: RefCell<Vec<ToolchainCmd>>,
}

impl RecordingRunner {
    pub(crate) fn with_version(version: &str) -> Self {
        let runner = RecordingRunner::default();
        runner.outputs.borrow_mut().push_back(Ok(version.to_string()));
        runner
    }

    pub(crate) fn with_output_error(err: ExecuteError) -> Self {
        let runner = RecordingRunner::default();
        runner.outputs.borrow_mut().push_back(Err(err));
        runner
    }

    pub(crate) fn failing_runs(mut self) -> Self {
        self.fail_runs = true;
        self
    }

    pub(crate) fn call_args(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(ToolchainCmd::args).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn output(&self, cmd: &ToolchainCmd) -> Result<String, ExecuteError> {
        self.calls.borrow_mut().push(cmd.clone());
        self.outputs
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    fn run(&self, cmd: &ToolchainCmd) -> Result<(), ExecuteError> {
        self.calls.borrow_mut().push(cmd.clone());
        if self.fail_runs {
            return Err(ExecuteError::CommandStatusError(
                cmd.executable().to_string(),
                1,
            ));
        }
        Ok(())
    }
}
