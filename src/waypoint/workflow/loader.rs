//! Workflow loader - JSON/YAML file loading and parsing
//!
//! This module handles loading workflow documents into a `WorkflowTree`.

use super::types::WorkflowTree;
use crate::runtime::{WaypointError, WorkflowError};
use std::fs;
use std::path::Path;

/// Encoding of a workflow document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` files are JSON, anything else is read as YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Loads workflow documents from disk
pub struct WorkflowLoader;

impl WorkflowLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a workflow document from a file, picking the format from its extension
    pub fn load_workflow<P: AsRef<Path>>(&self, path: P) -> Result<WorkflowTree, WaypointError> {
        let path = path.as_ref();
        let content = fs::read(path)?;
        let tree = Self::parse(&content, DocumentFormat::from_path(path))?;
        log::info!(
            "Loaded workflow '{}' with {} top-level steps",
            path.display(),
            tree.queue.len()
        );
        Ok(tree)
    }

    /// Parse a workflow document from raw bytes
    pub fn parse(content: &[u8], format: DocumentFormat) -> Result<WorkflowTree, WorkflowError> {
        let tree: WorkflowTree = match format {
            DocumentFormat::Json => serde_json::from_slice(content)?,
            DocumentFormat::Yaml => serde_yaml::from_slice(content)?,
        };
        Ok(tree)
    }

    /// Parse a workflow document from a JSON string
    pub fn parse_json(content: &str) -> Result<WorkflowTree, WorkflowError> {
        Self::parse(content.as_bytes(), DocumentFormat::Json)
    }

    /// Parse a workflow document from a YAML string
    pub fn parse_yaml(content: &str) -> Result<WorkflowTree, WorkflowError> {
        Self::parse(content.as_bytes(), DocumentFormat::Yaml)
    }
}

impl Default for WorkflowLoader {
    fn default() -> Self {
        Self::new()
    }
}
