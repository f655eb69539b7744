// SPDX-License-Identifier: MIT

//! Step addresses
//!
//! An address names one task inside a workflow tree as dash-delimited
//! segments: a global step number followed by one branch key per splitter
//! crossed on the way down, e.g. `4-web-small`.

use crate::runtime::WorkflowError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const SEPARATOR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepAddress {
    pub global_step: i64,
    pub branch_path: Vec<String>,
}

impl StepAddress {
    pub fn new(global_step: i64, branch_path: Vec<String>) -> Self {
        Self {
            global_step,
            branch_path,
        }
    }

    /// An address into a workflow without splitters
    pub fn flat(global_step: i64) -> Self {
        Self::new(global_step, Vec::new())
    }

    /// Reads the address from the final component of an output directory path.
    pub fn from_output_dir<P: AsRef<Path>>(path: P) -> Result<Self, WorkflowError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| WorkflowError::InvalidAddress(path.display().to_string()))?;
        name.parse()
    }
}

impl FromStr for StepAddress {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorkflowError::InvalidAddress(s.to_string());

        let mut segments = s.split(SEPARATOR);
        let global_step = segments
            .next()
            .filter(|first| !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|first| first.parse::<i64>().ok())
            .ok_or_else(invalid)?;

        let branch_path = segments
            .map(|segment| {
                if segment.is_empty() {
                    Err(invalid())
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(global_step, branch_path))
    }
}

impl fmt::Display for StepAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.global_step)?;
        for key in &self.branch_path {
            write!(f, "{}{}", SEPARATOR, key)?;
        }
        Ok(())
    }
}
