// SPDX-License-Identifier: MIT

//! Workspace layout and runtime options
//!
//! A workspace holds workflow documents under `Workflows/` and one directory
//! per task under `Tasks/`. Each layout name, the task entry point file and
//! the branch-path policy can be overridden through the environment (a `.env`
//! file is honoured by the binary).

use crate::runtime::WaypointError;
use crate::waypoint::workflow::BranchPathPolicy;
use std::env;
use std::path::PathBuf;

pub const WORKFLOWS_DIR_ENV: &str = "WAYPOINT_WORKFLOWS_DIR";
pub const TASKS_DIR_ENV: &str = "WAYPOINT_TASKS_DIR";
pub const ENTRY_POINT_ENV: &str = "WAYPOINT_ENTRY_POINT";
pub const BRANCH_POLICY_ENV: &str = "WAYPOINT_BRANCH_POLICY";

const DEFAULT_WORKFLOWS_DIR: &str = "Workflows";
const DEFAULT_TASKS_DIR: &str = "Tasks";
const DEFAULT_ENTRY_POINT: &str = "task";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    pub workflows_dir: String,
    pub tasks_dir: String,
    pub entry_point: String,
    pub branch_path_policy: BranchPathPolicy,
}

impl WorkspaceConfig {
    /// Default layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            workflows_dir: DEFAULT_WORKFLOWS_DIR.to_string(),
            tasks_dir: DEFAULT_TASKS_DIR.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            branch_path_policy: BranchPathPolicy::default(),
        }
    }

    /// Default layout with any `WAYPOINT_*` environment overrides applied
    pub fn from_env(root: impl Into<PathBuf>) -> Result<Self, WaypointError> {
        Self::new(root).with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps an env var name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, WaypointError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(WORKFLOWS_DIR_ENV) {
            self.workflows_dir = dir;
        }
        if let Some(dir) = lookup(TASKS_DIR_ENV) {
            self.tasks_dir = dir;
        }
        if let Some(entry_point) = lookup(ENTRY_POINT_ENV) {
            if entry_point.trim().is_empty() {
                return Err(WaypointError::config(format!(
                    "{} must not be empty",
                    ENTRY_POINT_ENV
                )));
            }
            self.entry_point = entry_point;
        }
        if let Some(policy) = lookup(BRANCH_POLICY_ENV) {
            self.branch_path_policy = policy
                .parse()
                .map_err(|e| WaypointError::config(format!("{}: {}", BRANCH_POLICY_ENV, e)))?;
        }
        Ok(self)
    }

    /// Fails unless the workspace root is an existing directory
    pub fn validate(&self) -> Result<(), WaypointError> {
        if !self.root.is_dir() {
            return Err(WaypointError::config(format!(
                "workspace '{}' is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }

    pub fn workflow_path(&self, workflow_name: &str) -> PathBuf {
        self.root.join(&self.workflows_dir).join(workflow_name)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.root.join(&self.tasks_dir)
    }
}
