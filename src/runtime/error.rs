// SPDX-License-Identifier: MIT

//! Typed error handling for waypoint-rs
//!
//! `WaypointError` is what an invocation surfaces at its boundary.
//! `WorkflowError` covers loading a workflow document and walking it with a
//! step address; it converts into `WaypointError` with `?`.

use thiserror::Error;

/// Top-level error type for waypoint-rs
#[derive(Debug, Error)]
pub enum WaypointError {
    /// Workflow loading or step resolution failed
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// No task unit could be obtained for the resolved name
    #[error("Task '{name}' could not be loaded: {reason}")]
    TaskLoad { name: String, reason: String },

    /// The task unit ran and reported a failure
    #[error("Task '{name}' failed")]
    TaskExecution {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (bad env overrides, missing workspace)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a workflow or resolving a step address
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Document is structurally invalid, or the address lands on a non-task position
    #[error("Malformed workflow: {0}")]
    MalformedWorkflow(String),

    /// Numeric step outside the bounds of the queue it indexes
    #[error("Step {step} is out of range for a queue of {len} entries")]
    AddressOutOfRange { step: i64, len: usize },

    /// Branch key not present in the splitter being traversed
    #[error("Unknown branch '{key}' (available: {available:?})")]
    UnknownBranch { key: String, available: Vec<String> },

    /// Step address text could not be parsed
    #[error("Invalid step address '{0}'")]
    InvalidAddress(String),
}

/// Returned by a task unit whose executable could not be obtained.
///
/// The dispatcher reports it as `WaypointError::TaskLoad` rather than as an
/// execution failure.
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct TaskUnavailable {
    pub reason: String,
}

impl TaskUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl WaypointError {
    /// Create a task load error
    pub fn task_load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TaskLoad {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a task execution error
    pub fn task_execution(
        name: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::TaskExecution {
            name: name.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl WorkflowError {
    /// Create a malformed workflow error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedWorkflow(message.into())
    }
}

impl From<serde_json::Error> for WorkflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedWorkflow(err.to_string())
    }
}

impl From<serde_yaml::Error> for WorkflowError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::MalformedWorkflow(err.to_string())
    }
}
