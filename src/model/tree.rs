use chrono::Duration;

use super::task::Task;

/// Nesting deeper than this is treated as evidence of a cycle in the input
/// rather than a legitimate hierarchy, and the load is rejected.
const MAX_DEPTH: usize = 64;

/// Structural errors, all detected at tree construction time. The status and
/// view computations assume a validated tree and never raise these.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    #[error("cycle detected: task {0:?} nests deeper than {MAX_DEPTH} levels")]
    CyclicReference(String),
    #[error("task {0:?} has late_at before due_at")]
    InvalidDeadlineOrder(String),
    #[error("task {0:?} has a negative visibility window")]
    NegativeVisibilityWindow(String),
}

/// A validated, read-only task hierarchy. Constructed once by the loader;
/// all status and view computations are projections over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTree {
    roots: Vec<Task>,
}

impl TaskTree {
    /// Build a tree from root tasks, validating structural invariants.
    pub fn new(roots: Vec<Task>) -> Result<Self, StructureError> {
        for root in &roots {
            validate(root, 0)?;
        }
        Ok(TaskTree { roots })
    }

    /// Root tasks in display order.
    pub fn roots(&self) -> &[Task] {
        &self.roots
    }

    /// Depth-first pre-order walk over every task. The callback receives the
    /// task, its ancestor labels from root to immediate parent, and its depth
    /// (0 = root).
    pub fn for_each_task<'a>(&'a self, f: &mut dyn FnMut(&'a Task, &[&'a str], usize)) {
        let mut path: Vec<&'a str> = Vec::new();
        for root in &self.roots {
            walk(root, &mut path, f);
        }
    }
}

fn walk<'a>(task: &'a Task, path: &mut Vec<&'a str>, f: &mut dyn FnMut(&'a Task, &[&'a str], usize)) {
    f(task, path, path.len());
    path.push(&task.label);
    for child in &task.children {
        walk(child, path, f);
    }
    path.pop();
}

fn validate(task: &Task, depth: usize) -> Result<(), StructureError> {
    if depth >= MAX_DEPTH {
        return Err(StructureError::CyclicReference(task.label.clone()));
    }
    if let (Some(due), Some(late)) = (task.due_at, task.late_at)
        && late < due
    {
        return Err(StructureError::InvalidDeadlineOrder(task.label.clone()));
    }
    if task.done_visible < Duration::zero() {
        return Err(StructureError::NegativeVisibilityWindow(task.label.clone()));
    }
    for child in &task.children {
        validate(child, depth + 1)?;
    }
    Ok(())
}

impl Task {
    /// All descendant leaves in traversal order. A leaf yields itself.
    pub fn descendant_leaves(&self) -> Vec<&Task> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }
}

fn collect_leaves<'a>(task: &'a Task, out: &mut Vec<&'a Task>) {
    if task.is_leaf() {
        out.push(task);
        return;
    }
    for child in &task.children {
        collect_leaves(child, out);
    }
}
