use async_trait::async_trait;
use serde_json::{Map, Value};
use std::error::Error;
use std::path::PathBuf;

/// Named options passed to a task unit, taken verbatim from the workflow step.
pub type Parameters = Map<String, Value>;

/// Everything a task unit receives for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInvocation {
    pub input_paths: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub parameters: Parameters,
}

impl TaskInvocation {
    pub fn new(input_paths: Vec<PathBuf>, output_path: PathBuf, parameters: Parameters) -> Self {
        Self {
            input_paths,
            output_path,
            parameters,
        }
    }

    /// Looks up a boolean option, falling back to `default` when absent or not a bool.
    pub fn bool_param(&self, key: &str, default: bool) -> bool {
        self.parameters
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }
}

/// Trait for the executable units that perform a workflow task.
///
/// Implementations are registered by name in a `TaskRegistry` and looked up
/// after a step address has been resolved.
#[async_trait]
pub trait TaskUnit: Send + Sync {
    /// Returns the task name (unique within a registry)
    fn name(&self) -> &str;

    /// Run the task against the given inputs and output directory
    async fn run(&self, invocation: &TaskInvocation) -> Result<(), Box<dyn Error + Send + Sync>>;
}
