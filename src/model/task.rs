use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The state a user explicitly set on a task, independent of deadlines.
///
/// For a task with children this is advisory only — the displayed status is
/// aggregated from the children (see [`crate::status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Open,
    InProgress,
    Done,
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Open
    }
}

/// A task node: display label, explicit state, optional deadlines, and
/// ordered children. Insertion order of `children` is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text
    pub label: String,
    /// Explicit checkbox state
    #[serde(default)]
    pub state: TaskState,
    /// Deadline; absent means no deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Point after which an incomplete task is late rather than merely due.
    /// Never precedes `due_at` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_at: Option<DateTime<Utc>>,
    /// When the task was marked done, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<DateTime<Utc>>,
    /// How long a done task stays visible in default views
    #[serde(
        default = "default_done_visible",
        with = "duration_secs",
        rename = "done_visible_secs"
    )]
    pub done_visible: Duration,
    /// Subtasks, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Task>,
}

fn default_done_visible() -> Duration {
    Duration::hours(24)
}

impl Task {
    /// Create a leaf task with no deadlines and the default visibility window.
    pub fn new(label: impl Into<String>, state: TaskState) -> Self {
        Task {
            label: label.into(),
            state,
            due_at: None,
            late_at: None,
            done_at: None,
            done_visible: default_done_visible(),
            children: Vec::new(),
        }
    }

    /// A task with no children is a leaf; only leaves appear in the flat view.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Serialize `chrono::Duration` as whole seconds in the task file.
mod duration_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(de)?;
        Ok(Duration::seconds(secs))
    }
}
