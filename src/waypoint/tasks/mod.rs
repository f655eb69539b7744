// SPDX-License-Identifier: MIT

//! Task units shipped with waypoint
//!
//! `ProcessTask` wraps the executable entry point found in a workspace task
//! directory. Built-ins are registered statically at start-up.

pub mod passthrough;
pub mod process;

pub use passthrough::PassThroughTask;
pub use process::ProcessTask;

use crate::runtime::TaskUnit;
use std::sync::Arc;

/// Task units available without a workspace task directory
pub fn builtin_tasks() -> Vec<Arc<dyn TaskUnit>> {
    vec![Arc::new(PassThroughTask)]
}
