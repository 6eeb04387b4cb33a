use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use super::Stage;

/// A fully specified external tool invocation for one pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageCommand {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Overlay on top of the inherited process environment
    pub env: Vec<(String, String)>,
}

impl StageCommand {
    pub fn new(stage: Stage, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            stage,
            program: program.into(),
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_envs(mut self, env: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(env);
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }

    /// Spawn the command with inherited stdio and block until it exits
    pub fn execute(&self) -> io::Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            tracing::debug!("Setting env: {}={}", key, value);
            cmd.env(key, value);
        }

        cmd.status()
    }
}
