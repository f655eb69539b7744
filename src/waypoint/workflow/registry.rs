// SPDX-License-Identifier: MIT

use crate::runtime::{TaskUnit, WaypointError};
use crate::waypoint::tasks::{builtin_tasks, ProcessTask};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Task units available to the dispatcher, keyed by task name
#[derive(Clone)]
pub struct TaskRegistry {
    tasks: Arc<RwLock<HashMap<String, Arc<dyn TaskUnit>>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A registry preloaded with the built-in task units
    pub async fn with_builtins() -> Self {
        let registry = Self::new();
        for task in builtin_tasks() {
            log::debug!("Registered built-in task: {}", task.name());
            registry.register(task).await;
        }
        registry
    }

    pub async fn register(&self, task: Arc<dyn TaskUnit>) {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.name().to_string(), task);
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn TaskUnit>> {
        let tasks = self.tasks.read().await;
        tasks.get(name).cloned()
    }

    /// Registered task names, sorted
    pub async fn names(&self) -> Vec<String> {
        let tasks = self.tasks.read().await;
        let mut names: Vec<String> = tasks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registers a `ProcessTask` for every sub-directory of `tasks_dir` that
    /// contains `entry_point`. Returns how many were registered.
    pub async fn scan_directory(
        &self,
        tasks_dir: &Path,
        entry_point: &str,
    ) -> Result<usize, WaypointError> {
        if !tasks_dir.is_dir() {
            log::warn!("Task directory '{}' does not exist", tasks_dir.display());
            return Ok(0);
        }

        let mut entries = tokio::fs::read_dir(tasks_dir).await?;
        let mut registered = 0;
        while let Some(entry) = entries.next_entry().await? {
            let task_dir = entry.path();
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Some(name) = task_dir.file_name().and_then(|name| name.to_str()) else {
                log::warn!("Skipping task directory with non UTF-8 name: {:?}", task_dir);
                continue;
            };
            if !task_dir.join(entry_point).is_file() {
                log::debug!("Skipping '{}': no '{}' entry point", name, entry_point);
                continue;
            }

            log::info!("Registered task: {}", name);
            self.register(Arc::new(ProcessTask::new(name, &task_dir, entry_point)))
                .await;
            registered += 1;
        }
        Ok(registered)
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
