use crate::model::{Status, TaskId, TaskStore};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Advance,
    Delete,
}

impl MenuItem {
    pub fn label(self, next: Status) -> String {
        match self {
            MenuItem::Advance => format!("Mark as {}", next.label()),
            MenuItem::Delete => "Delete".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Choosing(MenuItem),
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenMenu {
    task_id: TaskId,
    phase: Phase,
}

/// What the caller must do after a menu action settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    StatusChanged {
        task_id: TaskId,
        from: Status,
        to: Status,
    },
    Deleted {
        task_id: TaskId,
        from: Status,
    },
    None,
}

/// Single-owner menu state: at most one card menu is open at any time, and
/// opening a menu closes whichever one was open before.
#[derive(Debug, Default)]
pub struct MenuController {
    open: Option<OpenMenu>,
}

impl MenuController {
    pub fn new() -> Self {
        MenuController { open: None }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_task(&self) -> Option<TaskId> {
        self.open.map(|m| m.task_id)
    }

    pub fn selected(&self) -> Option<MenuItem> {
        match self.open?.phase {
            Phase::Choosing(item) => Some(item),
            Phase::ConfirmDelete => None,
        }
    }

    pub fn awaiting_confirm(&self) -> bool {
        matches!(
            self.open,
            Some(OpenMenu {
                phase: Phase::ConfirmDelete,
                ..
            })
        )
    }

    pub fn open(&mut self, task_id: TaskId) {
        self.open = Some(OpenMenu {
            task_id,
            phase: Phase::Choosing(MenuItem::Advance),
        });
    }

    /// A click or keypress outside the menu closes it.
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn toggle_selection(&mut self) {
        if let Some(menu) = self.open.as_mut() {
            if let Phase::Choosing(item) = menu.phase {
                menu.phase = Phase::Choosing(match item {
                    MenuItem::Advance => MenuItem::Delete,
                    MenuItem::Delete => MenuItem::Advance,
                });
            }
        }
    }

    /// Activates the highlighted item. "Mark as next" applies the cyclic
    /// status map immediately; "Delete" moves into the confirmation step.
    pub fn activate(&mut self, store: &mut TaskStore) -> MenuEffect {
        let Some(menu) = self.open else {
            return MenuEffect::None;
        };
        match menu.phase {
            Phase::Choosing(MenuItem::Advance) => {
                self.open = None;
                let from = match store.get(menu.task_id) {
                    Some(task) => task.status,
                    None => {
                        warn!(task_id = menu.task_id, "menu target vanished");
                        return MenuEffect::None;
                    }
                };
                match store.advance_status(menu.task_id) {
                    Ok(to) => MenuEffect::StatusChanged {
                        task_id: menu.task_id,
                        from,
                        to,
                    },
                    Err(err) => {
                        warn!(%err, "menu status change failed");
                        MenuEffect::None
                    }
                }
            }
            Phase::Choosing(MenuItem::Delete) => {
                self.open = Some(OpenMenu {
                    task_id: menu.task_id,
                    phase: Phase::ConfirmDelete,
                });
                MenuEffect::None
            }
            Phase::ConfirmDelete => MenuEffect::None,
        }
    }

    /// Resolves the pending delete confirmation; only removes on `confirmed`.
    pub fn resolve_delete(&mut self, store: &mut TaskStore, confirmed: bool) -> MenuEffect {
        let Some(menu) = self.open else {
            return MenuEffect::None;
        };
        if menu.phase != Phase::ConfirmDelete {
            return MenuEffect::None;
        }
        self.open = None;
        if !confirmed {
            return MenuEffect::None;
        }
        match store.remove(menu.task_id) {
            Ok(task) => MenuEffect::Deleted {
                task_id: task.id,
                from: task.status,
            },
            Err(err) => {
                warn!(%err, "delete target vanished");
                MenuEffect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskRecord;

    fn store() -> TaskStore {
        TaskStore::load(vec![
            TaskRecord {
                name: "a".into(),
                description: String::new(),
                due_date: "2025-11-10".parse().unwrap(),
                status: Status::ToDo,
            },
            TaskRecord {
                name: "b".into(),
                description: String::new(),
                due_date: "2025-11-12".parse().unwrap(),
                status: Status::Done,
            },
        ])
    }

    #[test]
    fn opening_a_menu_closes_the_previous_one() {
        let mut menus = MenuController::new();
        menus.open(1);
        menus.open(2);
        assert_eq!(menus.open_task(), Some(2));
    }

    #[test]
    fn advance_applies_the_cycle_and_closes() {
        let mut store = store();
        let mut menus = MenuController::new();
        menus.open(1);
        let effect = menus.activate(&mut store);
        assert_eq!(
            effect,
            MenuEffect::StatusChanged {
                task_id: 1,
                from: Status::ToDo,
                to: Status::InProgress
            }
        );
        assert!(!menus.is_open());
    }

    #[test]
    fn delete_requires_explicit_confirmation() {
        let mut store = store();
        let mut menus = MenuController::new();
        menus.open(2);
        menus.toggle_selection();
        assert_eq!(menus.selected(), Some(MenuItem::Delete));
        assert_eq!(menus.activate(&mut store), MenuEffect::None);
        assert!(menus.awaiting_confirm());
        assert_eq!(store.len(), 2);

        let effect = menus.resolve_delete(&mut store, true);
        assert_eq!(
            effect,
            MenuEffect::Deleted {
                task_id: 2,
                from: Status::Done
            }
        );
        assert_eq!(store.len(), 1);
        assert!(!menus.is_open());
    }

    #[test]
    fn declined_confirmation_deletes_nothing() {
        let mut store = store();
        let mut menus = MenuController::new();
        menus.open(2);
        menus.toggle_selection();
        menus.activate(&mut store);
        assert_eq!(menus.resolve_delete(&mut store, false), MenuEffect::None);
        assert_eq!(store.len(), 2);
        assert!(!menus.is_open());
    }

    #[test]
    fn vanished_target_is_a_noop() {
        let mut store = store();
        let mut menus = MenuController::new();
        menus.open(99);
        assert_eq!(menus.activate(&mut store), MenuEffect::None);
        assert!(!menus.is_open());
    }

    #[test]
    fn outside_click_closes_the_menu() {
        let mut menus = MenuController::new();
        menus.open(1);
        menus.close();
        assert!(!menus.is_open());
    }
}
