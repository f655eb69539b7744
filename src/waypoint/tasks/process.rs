// SPDX-License-Identifier: MIT

use crate::runtime::{TaskInvocation, TaskUnavailable, TaskUnit};
use anyhow::{bail, Context};
use async_trait::async_trait;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::process::{Child, Command};

/// Environment variable carrying the step parameters as a JSON object
pub const PARAMETERS_ENV: &str = "WAYPOINT_PARAMETERS";

/// A task backed by an executable entry point inside its task directory.
///
/// The entry point is started with the task directory as working directory and
/// receives `<output_path> <input_paths...>` as arguments. Parameters are
/// passed as JSON in `WAYPOINT_PARAMETERS`. Stdout and stderr are inherited.
pub struct ProcessTask {
    name: String,
    task_dir: PathBuf,
    program: PathBuf,
}

impl ProcessTask {
    pub fn new(name: impl Into<String>, task_dir: &Path, entry_point: &str) -> Self {
        Self {
            name: name.into(),
            task_dir: task_dir.to_path_buf(),
            program: task_dir.join(entry_point),
        }
    }

    fn command(&self, invocation: &TaskInvocation) -> anyhow::Result<Command> {
        let parameters = serde_json::to_string(&invocation.parameters)
            .context("failed to encode task parameters")?;

        let mut command = Command::new(&self.program);
        command
            .current_dir(&self.task_dir)
            .arg(&invocation.output_path)
            .args(&invocation.input_paths)
            .env(PARAMETERS_ENV, parameters);
        Ok(command)
    }

    async fn wait(&self, mut child: Child) -> anyhow::Result<()> {
        let status = child
            .wait()
            .await
            .with_context(|| format!("failed to wait for '{}'", self.program.display()))?;

        if !status.success() {
            bail!("'{}' exited with {}", self.program.display(), status);
        }
        Ok(())
    }
}

#[async_trait]
impl TaskUnit for ProcessTask {
    fn name(&self) -> &str {
        &self.name
    }

    /// A missing or non-executable entry point surfaces as `TaskUnavailable`;
    /// anything after a successful spawn is an execution failure.
    async fn run(&self, invocation: &TaskInvocation) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut command = self.command(invocation)?;

        log::debug!(
            "Spawning '{}' with {} input(s)",
            self.program.display(),
            invocation.input_paths.len()
        );

        let child = command.spawn().map_err(|err| {
            TaskUnavailable::new(format!(
                "cannot start '{}': {}",
                self.program.display(),
                err
            ))
        })?;
        self.wait(child).await.map_err(Into::into)
    }
}
