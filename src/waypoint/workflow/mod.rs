// SPDX-License-Identifier: MIT

pub mod address;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod types;

pub use address::StepAddress;
pub use loader::{DocumentFormat, WorkflowLoader};
pub use registry::TaskRegistry;
pub use resolver::{resolve, resolve_address, BranchPathPolicy, ResolvedTask};
pub use types::{Queue, SplitterStep, Step, TaskStep, WorkflowTree};
