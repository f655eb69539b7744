// SPDX-License-Identifier: MIT

//! Resolve one addressed step of a tree-shaped workflow and run its task.

pub mod runtime;
pub mod waypoint;
