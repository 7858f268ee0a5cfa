use crate::model::{Status, TaskId, TaskStore};
use tracing::warn;

/// Drag lifecycle for a single card. Browser drag semantics allow one card
/// in flight at a time; the single `DragState` value enforces the same here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { task_id: TaskId },
    HoveringTarget { task_id: TaskId, column: Status },
}

/// Result of completing a drop, so the caller knows which columns to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEffect {
    pub task_id: TaskId,
    pub from: Status,
    pub to: Status,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl DragController {
    pub fn new() -> Self {
        DragController {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn carried_task(&self) -> Option<TaskId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { task_id } | DragState::HoveringTarget { task_id, .. } => {
                Some(task_id)
            }
        }
    }

    /// Target column currently highlighted as a drop zone, if any.
    pub fn hover_column(&self) -> Option<Status> {
        match self.state {
            DragState::HoveringTarget { column, .. } => Some(column),
            _ => None,
        }
    }

    pub fn begin(&mut self, task_id: TaskId) {
        self.state = DragState::Dragging { task_id };
    }

    /// Drag-over on a column; purely visual feedback, reversible via `leave`.
    pub fn hover(&mut self, column: Status) {
        if let Some(task_id) = self.carried_task() {
            self.state = DragState::HoveringTarget { task_id, column };
        }
    }

    pub fn leave(&mut self) {
        if let Some(task_id) = self.carried_task() {
            self.state = DragState::Dragging { task_id };
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Completes the drop: reassigns the carried task to the target column's
    /// status. An unknown id (removed mid-drag) is a logged no-op. Always
    /// returns to idle.
    pub fn drop_on(&mut self, store: &mut TaskStore, column: Status) -> Option<DropEffect> {
        let task_id = self.carried_task();
        self.state = DragState::Idle;
        let task_id = task_id?;
        let from = match store.get(task_id) {
            Some(task) => task.status,
            None => {
                warn!(task_id, "dropped task no longer in store");
                return None;
            }
        };
        if store.set_status(task_id, column).is_err() {
            warn!(task_id, "dropped task no longer in store");
            return None;
        }
        Some(DropEffect {
            task_id,
            from,
            to: column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskRecord;

    fn store_with_one_todo() -> TaskStore {
        TaskStore::load(vec![TaskRecord {
            name: "card".into(),
            description: String::new(),
            due_date: "2025-11-10".parse().unwrap(),
            status: Status::ToDo,
        }])
    }

    #[test]
    fn hover_is_reversible_visual_feedback() {
        let mut drag = DragController::new();
        drag.begin(1);
        drag.hover(Status::Done);
        assert_eq!(drag.hover_column(), Some(Status::Done));
        drag.leave();
        assert_eq!(drag.state(), DragState::Dragging { task_id: 1 });
        assert_eq!(drag.hover_column(), None);
    }

    #[test]
    fn hover_without_drag_stays_idle() {
        let mut drag = DragController::new();
        drag.hover(Status::Done);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn drop_reassigns_status_and_returns_to_idle() {
        let mut store = store_with_one_todo();
        let mut drag = DragController::new();
        drag.begin(1);
        drag.hover(Status::InProgress);
        let effect = drag.drop_on(&mut store, Status::InProgress).unwrap();
        assert_eq!(
            effect,
            DropEffect {
                task_id: 1,
                from: Status::ToDo,
                to: Status::InProgress
            }
        );
        assert_eq!(store.get(1).unwrap().status, Status::InProgress);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn drop_of_removed_task_is_a_noop() {
        let mut store = store_with_one_todo();
        let mut drag = DragController::new();
        drag.begin(1);
        store.remove(1).unwrap();
        assert_eq!(drag.drop_on(&mut store, Status::Done), None);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn drop_while_idle_does_nothing() {
        let mut store = store_with_one_todo();
        let mut drag = DragController::new();
        assert_eq!(drag.drop_on(&mut store, Status::Done), None);
        assert_eq!(store.get(1).unwrap().status, Status::ToDo);
    }

    #[test]
    fn only_one_card_in_flight() {
        let mut drag = DragController::new();
        drag.begin(1);
        drag.begin(2);
        assert_eq!(drag.carried_task(), Some(2));
    }
}
