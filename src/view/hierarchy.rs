use chrono::{DateTime, Utc};

use crate::model::task::Task;
use crate::model::tree::TaskTree;
use crate::status::{EffectiveStatus, summarize};

/// One row of the nested outline view.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyRow<'a> {
    pub task: &'a Task,
    /// Nesting depth (0 = root), used for indentation
    pub depth: usize,
    pub status: EffectiveStatus,
    /// Bracketed-counter value for this node's subtree
    pub open_leaves: usize,
}

/// Project the tree into pre-order outline rows at `now`.
///
/// Expired tasks are omitted unless `include_expired` is set. A parent is
/// only expired when its whole subtree is, so pruning at the node is safe.
pub fn render_hierarchy<'a>(
    tree: &'a TaskTree,
    now: DateTime<Utc>,
    include_expired: bool,
) -> Vec<HierarchyRow<'a>> {
    let mut rows = Vec::new();
    for root in tree.roots() {
        push_rows(root, 0, now, include_expired, &mut rows);
    }
    rows
}

fn push_rows<'a>(
    task: &'a Task,
    depth: usize,
    now: DateTime<Utc>,
    include_expired: bool,
    rows: &mut Vec<HierarchyRow<'a>>,
) {
    let summary = summarize(task, now);
    if !include_expired && summary.status == EffectiveStatus::DoneExpired {
        return;
    }
    rows.push(HierarchyRow {
        task,
        depth,
        status: summary.status,
        open_leaves: summary.open_leaves,
    });
    for child in &task.children {
        push_rows(child, depth + 1, now, include_expired, rows);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::model::task::TaskState;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn sample_tree() -> TaskTree {
        let mut expired = Task::new("archived chore", TaskState::Done);
        expired.due_at = Some(t0() - Duration::hours(48));

        let mut due = Task::new("pay rent", TaskState::Open);
        due.due_at = Some(t0() - Duration::hours(1));

        let mut home = Task::new("Home", TaskState::Open);
        home.children = vec![due, expired];

        let mut reading = Task::new("reading", TaskState::InProgress);
        reading.due_at = Some(t0() + Duration::hours(6));
        let mut school = Task::new("School", TaskState::Open);
        school.children = vec![reading];

        TaskTree::new(vec![home, school]).unwrap()
    }

    #[test]
    fn test_rows_are_pre_order_with_depths() {
        let tree = sample_tree();
        let rows = render_hierarchy(&tree, t0(), true);
        let labels: Vec<(&str, usize)> = rows
            .iter()
            .map(|r| (r.task.label.as_str(), r.depth))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Home", 0),
                ("pay rent", 1),
                ("archived chore", 1),
                ("School", 0),
                ("reading", 1),
            ]
        );
    }

    #[test]
    fn test_expired_omitted_by_default() {
        let tree = sample_tree();
        let rows = render_hierarchy(&tree, t0(), false);
        assert!(rows.iter().all(|r| r.task.label != "archived chore"));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_fully_expired_subtree_is_pruned() {
        let mut expired = Task::new("old", TaskState::Done);
        expired.due_at = Some(t0() - Duration::hours(48));
        let mut parent = Task::new("Finished project", TaskState::Open);
        parent.children = vec![expired];
        let tree = TaskTree::new(vec![parent]).unwrap();

        assert!(render_hierarchy(&tree, t0(), false).is_empty());
        assert_eq!(render_hierarchy(&tree, t0(), true).len(), 2);
    }

    #[test]
    fn test_parent_row_carries_counter_and_status() {
        let tree = sample_tree();
        let rows = render_hierarchy(&tree, t0(), false);
        let home = rows.iter().find(|r| r.task.label == "Home").unwrap();
        assert_eq!(home.status, EffectiveStatus::Due);
        assert_eq!(home.open_leaves, 1);
    }
}
