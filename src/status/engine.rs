use chrono::{DateTime, Utc};

use crate::model::task::{Task, TaskState};

/// The computed, time-dependent display state of a task.
///
/// Precedence for leaves when several conditions hold: `Late` > `Due` >
/// explicit state. Completion freezes deadline effects — a done task is
/// never reclassified as due or late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    Open,
    InProgress,
    Due,
    Late,
    DoneVisible,
    DoneExpired,
}

impl EffectiveStatus {
    /// Done in either form — visible or already expired from default views.
    pub fn is_done(self) -> bool {
        matches!(self, EffectiveStatus::DoneVisible | EffectiveStatus::DoneExpired)
    }
}

/// Status plus the open-leaf counter shown as the bracketed summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub status: EffectiveStatus,
    /// Descendant leaves that are not done (a leaf counts itself)
    pub open_leaves: usize,
}

/// Compute a task's effective status at `now`.
///
/// A task with children takes its status from the children alone (bottom-up
/// aggregation); its own state and deadlines are ignored. A childless task
/// is classified from its own fields.
pub fn status_of(task: &Task, now: DateTime<Utc>) -> EffectiveStatus {
    if task.is_leaf() {
        return leaf_status(task, now);
    }
    aggregate(task.children.iter().map(|child| status_of(child, now)))
}

/// Count descendant leaves whose status is not done. This is derived fresh
/// on every call so the counter can never go stale as time advances.
pub fn open_leaves(task: &Task, now: DateTime<Utc>) -> usize {
    task.descendant_leaves()
        .into_iter()
        .filter(|leaf| !leaf_status(leaf, now).is_done())
        .count()
}

/// Status and open-leaf counter in one summary.
pub fn summarize(task: &Task, now: DateTime<Utc>) -> StatusSummary {
    StatusSummary {
        status: status_of(task, now),
        open_leaves: open_leaves(task, now),
    }
}

fn leaf_status(task: &Task, now: DateTime<Utc>) -> EffectiveStatus {
    if task.state == TaskState::Done {
        // Visibility anchor: the later of due date and completion time. With
        // neither recorded the task stays visible until archived externally.
        let anchor = match (task.due_at, task.done_at) {
            (Some(due), Some(done)) => Some(due.max(done)),
            (Some(due), None) => Some(due),
            (None, Some(done)) => Some(done),
            (None, None) => None,
        };
        return match anchor {
            Some(anchor) if now >= anchor + task.done_visible => EffectiveStatus::DoneExpired,
            _ => EffectiveStatus::DoneVisible,
        };
    }

    if let Some(late) = task.late_at
        && now >= late
    {
        return EffectiveStatus::Late;
    }
    if let Some(due) = task.due_at
        && now >= due
    {
        return EffectiveStatus::Due;
    }
    match task.state {
        TaskState::InProgress => EffectiveStatus::InProgress,
        _ => EffectiveStatus::Open,
    }
}

/// Aggregate a parent's status from its children's statuses, in the fixed
/// precedence order: Late, Due, all-done, InProgress, Open.
fn aggregate(statuses: impl Iterator<Item = EffectiveStatus>) -> EffectiveStatus {
    let mut any_due = false;
    let mut any_in_progress = false;
    let mut any_visible = false;
    let mut all_done = true;
    let mut seen_any = false;

    for status in statuses {
        seen_any = true;
        match status {
            EffectiveStatus::Late => return EffectiveStatus::Late,
            EffectiveStatus::Due => any_due = true,
            EffectiveStatus::InProgress => {
                any_in_progress = true;
                all_done = false;
            }
            EffectiveStatus::Open => all_done = false,
            EffectiveStatus::DoneVisible => any_visible = true,
            EffectiveStatus::DoneExpired => {}
        }
    }
    debug_assert!(seen_any, "aggregate called on a leaf");

    if any_due {
        EffectiveStatus::Due
    } else if all_done {
        if any_visible {
            EffectiveStatus::DoneVisible
        } else {
            EffectiveStatus::DoneExpired
        }
    } else if any_in_progress {
        EffectiveStatus::InProgress
    } else {
        EffectiveStatus::Open
    }
}
