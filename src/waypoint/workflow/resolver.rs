// SPDX-License-Identifier: MIT

//! Step resolution - walks a workflow tree with a step address
//!
//! Numbering is sequential per nesting level. A splitter takes one slot, the
//! last one, in its parent queue. Any step number past that slot continues
//! into the branch picked by the next branch key, where counting restarts at 1:
//!
//! ```text
//! queue:  1:A  2:<splitter>
//!                  x: 1:C          address 3-x -> C
//!                  y: 1:D  2:E     address 4-y -> E
//! ```

use super::address::StepAddress;
use super::types::{Queue, Step, WorkflowTree};
use crate::runtime::{Parameters, WorkflowError};
use std::str::FromStr;

/// What to do with branch keys left over once a task has been reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchPathPolicy {
    /// Unused branch keys make the address malformed
    #[default]
    Strict,
    /// Unused branch keys are ignored
    Lenient,
}

impl FromStr for BranchPathPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown branch path policy: {}", other)),
        }
    }
}

/// A task name together with the parameters it should be invoked with
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTask {
    pub name: String,
    pub parameters: Parameters,
}

/// Resolve `global_step` and `branch_path` against `queue`.
pub fn resolve(
    queue: &Queue,
    global_step: i64,
    branch_path: &[String],
    policy: BranchPathPolicy,
) -> Result<ResolvedTask, WorkflowError> {
    let mut queue = queue;
    let mut step = global_step;
    let mut path = branch_path;
    let mut depth = 0usize;

    loop {
        let len = queue.len();
        if len == 0 {
            return Err(WorkflowError::malformed(format!(
                "empty queue at nesting depth {}",
                depth
            )));
        }
        if step < 1 {
            return Err(WorkflowError::AddressOutOfRange { step, len });
        }

        let n = len as i64;
        match queue.splitter() {
            Some(splitter) if step > n => {
                let (key, rest) = path.split_first().ok_or_else(|| {
                    WorkflowError::malformed(format!(
                        "step {} lies beyond the splitter at depth {} but no branch key is left",
                        step, depth
                    ))
                })?;
                let branch = splitter
                    .branch(key)
                    .ok_or_else(|| WorkflowError::UnknownBranch {
                        key: key.clone(),
                        available: splitter.keys(),
                    })?;

                log::debug!(
                    "Descending into branch '{}' at depth {} (step {} -> {})",
                    key,
                    depth,
                    step,
                    step - n
                );
                queue = branch;
                step -= n;
                path = rest;
                depth += 1;
            }
            _ => return resolve_position(queue, step, path, policy),
        }
    }
}

/// Resolve a parsed address against a whole workflow tree.
pub fn resolve_address(
    tree: &WorkflowTree,
    address: &StepAddress,
    policy: BranchPathPolicy,
) -> Result<ResolvedTask, WorkflowError> {
    resolve(&tree.queue, address.global_step, &address.branch_path, policy)
}

fn resolve_position(
    queue: &Queue,
    step: i64,
    unused_path: &[String],
    policy: BranchPathPolicy,
) -> Result<ResolvedTask, WorkflowError> {
    let len = queue.len();
    let index = usize::try_from(step - 1)
        .ok()
        .filter(|index| *index < len)
        .ok_or(WorkflowError::AddressOutOfRange { step, len })?;

    let task = match &queue.steps()[index] {
        Step::Task(task) => task,
        Step::Splitter(_) => {
            return Err(WorkflowError::malformed(format!(
                "step {} addresses a splitter, not a task",
                step
            )))
        }
    };

    if !unused_path.is_empty() {
        match policy {
            BranchPathPolicy::Strict => {
                return Err(WorkflowError::malformed(format!(
                    "address has unused branch keys {:?} after reaching task '{}'",
                    unused_path, task.name
                )))
            }
            BranchPathPolicy::Lenient => {
                log::debug!("Ignoring unused branch keys {:?}", unused_path);
            }
        }
    }

    Ok(ResolvedTask {
        name: task.name.clone(),
        parameters: task.parameters.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::workflow::types::{SplitterStep, TaskStep};
    use indexmap::IndexMap;
    use serde_json::json;

    fn task(name: &str) -> Step {
        Step::Task(TaskStep::new(name))
    }

    fn splitter(branches: Vec<(&str, Queue)>) -> Step {
        let branches: IndexMap<String, Queue> = branches
            .into_iter()
            .map(|(key, queue)| (key.to_string(), queue))
            .collect();
        Step::Splitter(SplitterStep::new(branches))
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    fn name_of(queue: &Queue, step: i64, path: &[&str]) -> Result<String, WorkflowError> {
        resolve(queue, step, &keys(path), BranchPathPolicy::Strict).map(|resolved| resolved.name)
    }

    /// `[A, <x: [C], y: [D]>]`
    fn scenario() -> Queue {
        Queue::new(vec![
            task("A"),
            splitter(vec![
                ("x", Queue::new(vec![task("C")])),
                ("y", Queue::new(vec![task("D")])),
            ]),
        ])
    }

    /// `[A, B, <x: [C, <p: [E], q: [F, G]>], y: [D]>]`
    fn nested() -> Queue {
        Queue::new(vec![
            task("A"),
            task("B"),
            splitter(vec![
                (
                    "x",
                    Queue::new(vec![
                        task("C"),
                        splitter(vec![
                            ("p", Queue::new(vec![task("E")])),
                            ("q", Queue::new(vec![task("F"), task("G")])),
                        ]),
                    ]),
                ),
                ("y", Queue::new(vec![task("D")])),
            ]),
        ])
    }

    #[test]
    fn test_flat_queue_every_position() {
        let queue = Queue::new(vec![task("A"), task("B"), task("C")]);
        for (step, expected) in [(1, "A"), (2, "B"), (3, "C")] {
            assert_eq!(name_of(&queue, step, &[]).unwrap(), expected);
        }
    }

    #[test]
    fn test_flat_queue_out_of_range() {
        let queue = Queue::new(vec![task("A"), task("B")]);
        for step in [0, -1, 3, 100] {
            assert_eq!(
                name_of(&queue, step, &[]),
                Err(WorkflowError::AddressOutOfRange { step, len: 2 })
            );
        }
    }

    #[test]
    fn test_scenario() {
        let queue = scenario();
        assert_eq!(name_of(&queue, 1, &[]).unwrap(), "A");
        assert_eq!(name_of(&queue, 3, &["x"]).unwrap(), "C");
        assert_eq!(name_of(&queue, 3, &["y"]).unwrap(), "D");
        assert_eq!(
            name_of(&queue, 3, &["z"]),
            Err(WorkflowError::UnknownBranch {
                key: "z".to_string(),
                available: keys(&["x", "y"]),
            })
        );
    }

    #[test]
    fn test_splitter_slot_is_not_a_task() {
        let queue = scenario();
        assert!(matches!(
            name_of(&queue, 2, &["x"]),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
        assert!(matches!(
            resolve(&queue, 2, &[], BranchPathPolicy::Lenient),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
    }

    #[test]
    fn test_past_branch_end_is_out_of_range() {
        let queue = scenario();
        assert_eq!(
            name_of(&queue, 4, &["x"]),
            Err(WorkflowError::AddressOutOfRange { step: 2, len: 1 })
        );
    }

    #[test]
    fn test_missing_branch_key_is_malformed() {
        let queue = scenario();
        assert!(matches!(
            name_of(&queue, 3, &[]),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
    }

    #[test]
    fn test_doubly_nested() {
        let queue = nested();
        assert_eq!(name_of(&queue, 2, &[]).unwrap(), "B");
        assert_eq!(name_of(&queue, 4, &["x"]).unwrap(), "C");
        assert_eq!(name_of(&queue, 4, &["y"]).unwrap(), "D");
        assert_eq!(name_of(&queue, 6, &["x", "p"]).unwrap(), "E");
        assert_eq!(name_of(&queue, 6, &["x", "q"]).unwrap(), "F");
        assert_eq!(name_of(&queue, 7, &["x", "q"]).unwrap(), "G");
        assert!(matches!(
            name_of(&queue, 5, &["x", "p"]),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
    }

    #[test]
    fn test_nesting_law() {
        let queue = nested();
        let n = queue.len() as i64;
        let branch_x = queue.splitter().unwrap().branch("x").unwrap();

        for (step, path) in [(4, ["x", "p"]), (6, ["x", "p"]), (6, ["x", "q"]), (7, ["x", "q"])] {
            let whole = name_of(&queue, step, &path);
            let sub = name_of(branch_x, step - n, &path[1..]);
            assert_eq!(whole, sub, "address {}-{}", step, path.join("-"));
        }
    }

    #[test]
    fn test_extra_branch_keys_strict() {
        let queue = scenario();
        assert!(matches!(
            name_of(&queue, 1, &["x"]),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
        assert!(matches!(
            name_of(&queue, 3, &["x", "extra"]),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
    }

    #[test]
    fn test_extra_branch_keys_lenient() {
        let queue = scenario();
        let resolved = resolve(&queue, 1, &keys(&["x"]), BranchPathPolicy::Lenient).unwrap();
        assert_eq!(resolved.name, "A");
        let resolved =
            resolve(&queue, 3, &keys(&["y", "extra"]), BranchPathPolicy::Lenient).unwrap();
        assert_eq!(resolved.name, "D");
    }

    #[test]
    fn test_empty_queue_is_malformed() {
        let queue = Queue::new(vec![]);
        for step in [0, 1, 5] {
            assert!(matches!(
                name_of(&queue, step, &[]),
                Err(WorkflowError::MalformedWorkflow(_))
            ));
        }

        let queue = Queue::new(vec![splitter(vec![("x", Queue::new(vec![]))])]);
        assert!(matches!(
            name_of(&queue, 2, &["x"]),
            Err(WorkflowError::MalformedWorkflow(_))
        ));
    }

    #[test]
    fn test_parameters_are_returned() {
        let mut parameters = Parameters::new();
        parameters.insert("quality".to_string(), json!(80));
        let queue = Queue::new(vec![Step::Task(
            TaskStep::new("Compress").with_parameters(parameters.clone()),
        )]);

        let resolved = resolve(&queue, 1, &[], BranchPathPolicy::Strict).unwrap();
        assert_eq!(resolved.parameters, parameters);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let queue = nested();
        let first = resolve(&queue, 7, &keys(&["x", "q"]), BranchPathPolicy::Strict);
        for _ in 0..3 {
            assert_eq!(
                resolve(&queue, 7, &keys(&["x", "q"]), BranchPathPolicy::Strict),
                first
            );
        }
        assert_eq!(queue, nested());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<BranchPathPolicy>(), Ok(BranchPathPolicy::Strict));
        assert_eq!("Lenient".parse::<BranchPathPolicy>(), Ok(BranchPathPolicy::Lenient));
        assert!("loose".parse::<BranchPathPolicy>().is_err());
    }
}
