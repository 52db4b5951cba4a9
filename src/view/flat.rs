use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::model::task::Task;
use crate::model::tree::TaskTree;
use crate::status::{EffectiveStatus, status_of};

/// Separator between ancestor labels in a breadcrumb.
pub const BREADCRUMB_SEP: &str = " > ";

/// Bucket in the flat by-category view, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Late,
    Due,
    Complete,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Late => write!(f, "Late"),
            Category::Due => write!(f, "Due"),
            Category::Complete => write!(f, "Complete"),
        }
    }
}

/// A leaf task surfaced in the flat view, with the path back to its
/// location in the tree.
#[derive(Debug, Clone)]
pub struct FlatEntry<'a> {
    pub task: &'a Task,
    /// Ancestor labels joined with [`BREADCRUMB_SEP`]
    pub breadcrumb: String,
}

/// The flat projection: time-sensitive leaves grouped Late → Due → Complete,
/// each bucket in tree traversal order.
#[derive(Debug)]
pub struct FlatView<'a> {
    buckets: IndexMap<Category, Vec<FlatEntry<'a>>>,
}

impl<'a> FlatView<'a> {
    pub fn bucket(&self, category: Category) -> &[FlatEntry<'a>] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets in fixed display order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[FlatEntry<'a>])> {
        self.buckets.iter().map(|(c, entries)| (*c, entries.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}

/// Project the tree into the flat by-category view at `now`.
///
/// Only leaves appear, and only those whose status is `Late`, `Due`, or
/// `DoneVisible`; open, in-progress, and expired leaves are excluded — this
/// view exists to surface time-sensitive items.
pub fn render_flat<'a>(tree: &'a TaskTree, now: DateTime<Utc>) -> FlatView<'a> {
    let mut buckets: IndexMap<Category, Vec<FlatEntry<'a>>> = IndexMap::new();
    buckets.insert(Category::Late, Vec::new());
    buckets.insert(Category::Due, Vec::new());
    buckets.insert(Category::Complete, Vec::new());

    tree.for_each_task(&mut |task, path, _depth| {
        if !task.is_leaf() {
            return;
        }
        let category = match status_of(task, now) {
            EffectiveStatus::Late => Category::Late,
            EffectiveStatus::Due => Category::Due,
            EffectiveStatus::DoneVisible => Category::Complete,
            _ => return,
        };
        buckets[&category].push(FlatEntry {
            task,
            breadcrumb: path.join(BREADCRUMB_SEP),
        });
    });

    FlatView { buckets }
}
