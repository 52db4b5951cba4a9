use serde::Serialize;

use crate::status::EffectiveStatus;
use crate::view::flat::{Category, FlatView};
use crate::view::hierarchy::HierarchyRow;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HierarchyRowJson {
    pub label: String,
    pub depth: usize,
    pub status: EffectiveStatus,
    pub open_leaves: usize,
}

#[derive(Serialize)]
pub struct FlatEntryJson {
    pub label: String,
    pub breadcrumb: String,
}

#[derive(Serialize)]
pub struct FlatJson {
    pub late: Vec<FlatEntryJson>,
    pub due: Vec<FlatEntryJson>,
    pub complete: Vec<FlatEntryJson>,
}

pub fn hierarchy_to_json(rows: &[HierarchyRow<'_>]) -> Vec<HierarchyRowJson> {
    rows.iter()
        .map(|row| HierarchyRowJson {
            label: row.task.label.clone(),
            depth: row.depth,
            status: row.status,
            open_leaves: row.open_leaves,
        })
        .collect()
}

pub fn flat_to_json(view: &FlatView<'_>) -> FlatJson {
    let bucket = |category: Category| -> Vec<FlatEntryJson> {
        view.bucket(category)
            .iter()
            .map(|entry| FlatEntryJson {
                label: entry.task.label.clone(),
                breadcrumb: entry.breadcrumb.clone(),
            })
            .collect()
    };
    FlatJson {
        late: bucket(Category::Late),
        due: bucket(Category::Due),
        complete: bucket(Category::Complete),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// The character inside the `[ ]` cell for a leaf task.
pub fn status_char(status: EffectiveStatus) -> char {
    match status {
        EffectiveStatus::Open => ' ',
        EffectiveStatus::InProgress => '>',
        EffectiveStatus::Due => '!',
        EffectiveStatus::Late => 'L',
        EffectiveStatus::DoneVisible => 'x',
        EffectiveStatus::DoneExpired => '.',
    }
}

/// The bracketed counter for a parent: a digit for small counts, `+` past 9.
pub fn counter_char(open_leaves: usize) -> char {
    if open_leaves < 10 {
        char::from_digit(open_leaves as u32, 10).expect("single digit")
    } else {
        '+'
    }
}

fn row_cell(row: &HierarchyRow<'_>) -> char {
    if row.task.is_leaf() {
        status_char(row.status)
    } else if row.status.is_done() {
        '*'
    } else {
        counter_char(row.open_leaves)
    }
}

/// Format outline rows, two spaces of indent per depth.
pub fn format_hierarchy(rows: &[HierarchyRow<'_>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let mut line = format!(
                "{}[{}] {}",
                "  ".repeat(row.depth),
                row_cell(row),
                row.task.label
            );
            if row.task.is_leaf()
                && !row.status.is_done()
                && let Some(due) = row.task.due_at
            {
                line.push_str(&format!(" (due {})", due.format("%Y-%m-%d %H:%M")));
            }
            line
        })
        .collect()
}

/// Format the flat view: a header per non-empty bucket, entries with
/// breadcrumbs back to their place in the tree.
pub fn format_flat(view: &FlatView<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for (category, entries) in view.iter() {
        if entries.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("== {} ==", category));
        for entry in entries {
            let crumb = if entry.breadcrumb.is_empty() {
                String::new()
            } else {
                format!("  ({})", entry.breadcrumb)
            };
            lines.push(format!("  {}{}", entry.task.label, crumb));
        }
    }
    if lines.is_empty() {
        lines.push("nothing due, late, or recently completed".to_string());
    }
    lines
}
