// SPDX-License-Identifier: MIT

//! Schema types for workflow documents
//!
//! A workflow is a tree: the top-level `queue` holds task steps and may end in
//! a splitter whose branches are queues of their own.
//!
//! ```yaml
//! queue:
//!   - task: Resize
//!     parameters:
//!       width: 640
//!   - splitter:
//!       web:
//!         - task: Compress
//!       print:
//!         - task: Convert
//! ```

use crate::runtime::Parameters;
use indexmap::IndexMap;
use serde::Deserialize;

/// Root of a workflow document
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WorkflowTree {
    pub queue: Queue,
}

/// Ordered sequence of steps, addressed 1-based from the outside
///
/// Documents are checked on load: a queue is never empty and a splitter may
/// only be its last entry.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(try_from = "Vec<Step>")]
pub struct Queue(Vec<Step>);

impl Queue {
    /// Builds a queue without the structural checks applied to documents.
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The trailing splitter, if this queue forks
    pub fn splitter(&self) -> Option<&SplitterStep> {
        match self.0.last() {
            Some(Step::Splitter(splitter)) => Some(splitter),
            _ => None,
        }
    }
}

impl TryFrom<Vec<Step>> for Queue {
    type Error = String;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        if steps.is_empty() {
            return Err("queue must contain at least one step".to_string());
        }
        let last = steps.len() - 1;
        if let Some(position) = steps[..last]
            .iter()
            .position(|step| matches!(step, Step::Splitter(_)))
        {
            return Err(format!(
                "splitter at position {} must be the last entry of its queue",
                position + 1
            ));
        }
        Ok(Self(steps))
    }
}

/// One entry of a queue
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(try_from = "RawStep")]
pub enum Step {
    Task(TaskStep),
    Splitter(SplitterStep),
}

/// A concrete unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStep {
    pub name: String,
    pub parameters: Parameters,
}

impl TaskStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Branch point forking the rest of execution into named queues
#[derive(Debug, Clone, PartialEq)]
pub struct SplitterStep {
    pub branches: IndexMap<String, Queue>,
}

impl SplitterStep {
    pub fn new(branches: IndexMap<String, Queue>) -> Self {
        Self { branches }
    }

    pub fn branch(&self, key: &str) -> Option<&Queue> {
        self.branches.get(key)
    }

    /// Branch keys in document order
    pub fn keys(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }
}

/// On-disk shape of a step; `kwargs` is the older spelling of `parameters`.
#[derive(Debug, Deserialize)]
struct RawStep {
    task: Option<String>,
    #[serde(default, alias = "kwargs")]
    parameters: Option<Parameters>,
    splitter: Option<IndexMap<String, Queue>>,
}

impl TryFrom<RawStep> for Step {
    type Error = String;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        if let Some(branches) = raw.splitter {
            if branches.is_empty() {
                return Err("splitter must declare at least one branch".to_string());
            }
            return Ok(Step::Splitter(SplitterStep::new(branches)));
        }

        match raw.task {
            Some(name) if !name.trim().is_empty() => Ok(Step::Task(TaskStep {
                name,
                parameters: raw.parameters.unwrap_or_default(),
            })),
            Some(_) => Err("task step has an empty name".to_string()),
            None => Err("step must declare either 'task' or 'splitter'".to_string()),
        }
    }
}
