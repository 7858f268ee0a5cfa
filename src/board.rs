use crate::deadline::{self, Urgency};
use crate::model::{Status, TaskId, TaskStore, COLUMN_ORDER};
use chrono::NaiveDate;

pub const PLACEHOLDER: &str = "No tasks.";

/// Everything the UI needs to paint one card. Holds the task id as a
/// back-reference only; the store stays the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub due_text: String,
    pub badge: Option<Urgency>,
}

/// One rendered column: either the placeholder or the filtered card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub status: Status,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Recomputes a column's visible cards from the store, in store order.
/// Done and Pending columns carry no deadline badge.
pub fn column_view(store: &TaskStore, status: Status, now: NaiveDate) -> ColumnView {
    let wants_badge = matches!(status, Status::ToDo | Status::InProgress);
    let cards = store
        .tasks_with_status(status)
        .map(|task| CardView {
            id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            due_text: deadline::format_display(task.due_date),
            badge: wants_badge.then(|| deadline::classify(task.due_date, now)),
        })
        .collect();
    ColumnView { status, cards }
}

pub fn all_columns(store: &TaskStore, now: NaiveDate) -> Vec<ColumnView> {
    COLUMN_ORDER
        .iter()
        .map(|&status| column_view(store, status, now))
        .collect()
}

/// The `updateColumnCounts` pass: displayed counts for all four columns,
/// recomputed from the store after every mutation.
pub fn column_counts(store: &TaskStore) -> [usize; 4] {
    let mut counts = [0; 4];
    for (slot, &status) in counts.iter_mut().zip(COLUMN_ORDER.iter()) {
        *slot = store.status_count(status);
    }
    counts
}
