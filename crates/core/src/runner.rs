//! Blocking execution of stage commands

use std::io;

use colored::Colorize;
use tracing::{debug, warn};

use crate::command::StageCommand;
use crate::error::{Error, Result};

/// Terminal status of one external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl StageStatus {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

impl From<std::process::ExitStatus> for StageStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Runs a stage command to completion.
///
/// `io::Error` is reserved for commands that could not be spawned at all.
pub trait StageExecutor {
    fn execute(&self, command: &StageCommand) -> io::Result<StageStatus>;
}

/// Executes stage commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl StageExecutor for ProcessExecutor {
    fn execute(&self, command: &StageCommand) -> io::Result<StageStatus> {
        command.execute().map(StageStatus::from)
    }
}

impl<E: StageExecutor + ?Sized> StageExecutor for &E {
    fn execute(&self, command: &StageCommand) -> io::Result<StageStatus> {
        (**self).execute(command)
    }
}

/// Print the trace line, run the command and turn anything but success into
/// [`Error::StageFailed`].
pub fn run_stage<E: StageExecutor + ?Sized>(executor: &E, command: &StageCommand) -> Result<()> {
    println!(
        "{} {}",
        command.stage.label().green().bold(),
        command.to_shell_command()
    );
    if let Some(ref dir) = command.working_dir {
        debug!("Working directory: {}", dir.display());
    }

    let status = match executor.execute(command) {
        Ok(status) => status,
        Err(e) => {
            warn!("Failed to spawn {}: {}", command.program, e);
            StageStatus::failure(None)
        }
    };

    if status.success {
        println!("{}", success_line(command));
        Ok(())
    } else {
        Err(Error::StageFailed {
            stage: command.stage.name(),
            status: status.code,
        })
    }
}

fn success_line(command: &StageCommand) -> String {
    format!("{} {}", "ok".green().bold(), command.stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Stage;

    struct Fixed(io::Result<StageStatus>);

    impl StageExecutor for Fixed {
        fn execute(&self, _command: &StageCommand) -> io::Result<StageStatus> {
            match &self.0 {
                Ok(status) => Ok(*status),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    fn command() -> StageCommand {
        StageCommand::new(Stage::Compile, "cargo", vec!["build".to_string()])
    }

    #[test]
    fn test_success_passes() {
        assert!(run_stage(&Fixed(Ok(StageStatus::success())), &command()).is_ok());
    }

    #[test]
    fn test_success_line_names_stage() {
        let line = success_line(&command());
        assert!(line.contains("ok"));
        assert!(line.contains("compile"));
    }

    #[test]
    fn test_failure_carries_stage_and_code() {
        let err = run_stage(&Fixed(Ok(StageStatus::failure(Some(101)))), &command()).unwrap_err();
        match err {
            Error::StageFailed { stage, status } => {
                assert_eq!(stage, "compile");
                assert_eq!(status, Some(101));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_spawn_error_is_stage_failure() {
        let executor = Fixed(Err(io::Error::new(io::ErrorKind::NotFound, "no cargo")));
        let err = run_stage(&executor, &command()).unwrap_err();
        assert!(matches!(err, Error::StageFailed { status: None, .. }));
    }

    #[test]
    fn test_process_executor_missing_program() {
        let cmd = StageCommand::new(Stage::Format, "wasmbuild-no-such-formatter", vec![]);
        let err = run_stage(&ProcessExecutor, &cmd).unwrap_err();
        assert!(matches!(err, Error::StageFailed { stage: "format", .. }));
    }
}
