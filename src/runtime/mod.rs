pub mod error;
pub mod task;

pub use error::{TaskUnavailable, WaypointError, WorkflowError};
pub use task::{Parameters, TaskInvocation, TaskUnit};
