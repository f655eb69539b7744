// SPDX-License-Identifier: MIT

//! Runner - performs one complete invocation
//!
//! Load the workflow, read the step address from the output directory name,
//! resolve it, enumerate the inputs and dispatch the task.

use crate::runtime::WaypointError;
use crate::waypoint::config::WorkspaceConfig;
use crate::waypoint::dispatch::{report_failure, Dispatcher, ExitSignal};
use crate::waypoint::inputs::list_input_paths;
use crate::waypoint::workflow::{
    resolve_address, ResolvedTask, StepAddress, TaskRegistry, WorkflowLoader,
};
use std::path::{Path, PathBuf};

pub struct Runner {
    config: WorkspaceConfig,
    loader: WorkflowLoader,
    dispatcher: Dispatcher,
}

impl Runner {
    pub fn new(config: WorkspaceConfig, registry: TaskRegistry) -> Self {
        Self {
            config,
            loader: WorkflowLoader::new(),
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// Build a runner whose registry holds the built-ins plus every task
    /// found in the workspace task directory.
    pub async fn from_workspace(config: WorkspaceConfig) -> Result<Self, WaypointError> {
        config.validate()?;
        let registry = TaskRegistry::with_builtins().await;
        let found = registry
            .scan_directory(&config.tasks_path(), &config.entry_point)
            .await?;
        log::info!(
            "Loaded {} task(s) from '{}'",
            found,
            config.tasks_path().display()
        );
        Ok(Self::new(config, registry))
    }

    /// Resolve the step addressed by `output_dir` in workflow `workflow_name`.
    pub fn resolve_step(
        &self,
        workflow_name: &str,
        output_dir: &Path,
    ) -> Result<ResolvedTask, WaypointError> {
        let tree = self
            .loader
            .load_workflow(self.config.workflow_path(workflow_name))?;
        let address = StepAddress::from_output_dir(output_dir)?;
        let task = resolve_address(&tree, &address, self.config.branch_path_policy)?;
        log::info!("Step {} resolves to task '{}'", address, task.name);
        Ok(task)
    }

    /// Resolve the addressed step and enumerate its inputs.
    pub async fn prepare(
        &self,
        workflow_name: &str,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<(ResolvedTask, Vec<PathBuf>), WaypointError> {
        let task = self.resolve_step(workflow_name, output_dir)?;
        let input_paths = list_input_paths(input_dir).await?;
        Ok((task, input_paths))
    }

    /// Run the addressed step, reporting any failure on stderr.
    pub async fn run(&self, workflow_name: &str, input_dir: &Path, output_dir: &Path) -> ExitSignal {
        match self.prepare(workflow_name, input_dir, output_dir).await {
            Ok((task, input_paths)) => {
                self.dispatcher
                    .dispatch(&task, input_paths, output_dir)
                    .await
            }
            Err(err) => report_failure(&err),
        }
    }
}
