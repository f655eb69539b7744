// SPDX-License-Identifier: MIT

//! Task dispatch - hands a resolved task to its task unit
//!
//! A failure at any point is terminal for the invocation: it is described on
//! stderr (with its full cause chain) and turned into `ExitSignal::Failure`.

use crate::runtime::{Parameters, TaskInvocation, TaskUnavailable, WaypointError};
use crate::waypoint::workflow::{ResolvedTask, TaskRegistry};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Process-level outcome of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Success,
    Failure,
}

impl ExitSignal {
    pub fn code(self) -> u8 {
        match self {
            ExitSignal::Success => 0,
            ExitSignal::Failure => 1,
        }
    }
}

impl From<ExitSignal> for ExitCode {
    fn from(signal: ExitSignal) -> Self {
        ExitCode::from(signal.code())
    }
}

/// Write `err` and every error in its source chain to `out`.
pub fn write_diagnostic<W: Write>(out: &mut W, err: &(dyn Error + 'static)) -> io::Result<()> {
    writeln!(out, "error: {}", err)?;
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {}", cause)?;
        source = cause.source();
    }
    Ok(())
}

/// Print the diagnostic for `err` to stderr, returning the failure signal.
pub fn report_failure(err: &WaypointError) -> ExitSignal {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    report_failure_to(&mut handle, err)
}

/// Write the diagnostic for `err` to `out` once. The log only gets a debug
/// line so the default stderr output carries a single report.
pub fn report_failure_to<W: Write>(out: &mut W, err: &WaypointError) -> ExitSignal {
    log::debug!("Invocation failed: {:?}", err);
    if let Err(io_err) = write_diagnostic(out, err) {
        log::warn!("Failed to write diagnostic: {}", io_err);
    }
    ExitSignal::Failure
}

/// Looks up task units by name and runs them
pub struct Dispatcher {
    registry: TaskRegistry,
}

impl Dispatcher {
    pub fn new(registry: TaskRegistry) -> Self {
        Self { registry }
    }

    /// Run `task_name` once, surfacing load and execution failures as errors.
    pub async fn try_dispatch(
        &self,
        task_name: &str,
        parameters: Parameters,
        input_paths: Vec<PathBuf>,
        output_path: &Path,
    ) -> Result<(), WaypointError> {
        let Some(unit) = self.registry.get(task_name).await else {
            let available = self.registry.names().await;
            return Err(WaypointError::task_load(
                task_name,
                format!("no task unit registered (available: {:?})", available),
            ));
        };

        let invocation = TaskInvocation::new(input_paths, output_path.to_path_buf(), parameters);
        log::info!(
            "Running task '{}' on {} input(s) into '{}'",
            task_name,
            invocation.input_paths.len(),
            output_path.display()
        );

        unit.run(&invocation).await.map_err(|source| {
            match source.downcast::<TaskUnavailable>() {
                Ok(unavailable) => WaypointError::task_load(task_name, unavailable.reason),
                Err(source) => WaypointError::task_execution(task_name, source),
            }
        })
    }

    /// Run a resolved task and translate the outcome into an exit signal.
    pub async fn dispatch(
        &self,
        task: &ResolvedTask,
        input_paths: Vec<PathBuf>,
        output_path: &Path,
    ) -> ExitSignal {
        match self
            .try_dispatch(&task.name, task.parameters.clone(), input_paths, output_path)
            .await
        {
            Ok(()) => {
                log::info!("Task '{}' completed", task.name);
                ExitSignal::Success
            }
            Err(err) => report_failure(&err),
        }
    }
}
