use serde::{Deserialize, Serialize};

pub type TaskId = u64;

/// The four fixed board columns, in their rendered order.
pub const COLUMN_ORDER: [Status; 4] = [
    Status::ToDo,
    Status::InProgress,
    Status::Done,
    Status::Pending,
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    ToDo,
    InProgress,
    Done,
    Pending,
}

impl Status {
    /// Fixed cyclic order used by both the context menu and `advance_status`.
    pub fn next(self) -> Status {
        match self {
            Status::ToDo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Pending,
            Status::Pending => Status::ToDo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
            Status::Pending => "Pending",
        }
    }
}

/// Raw task record as it arrives from `tasks.json`; ids are assigned by the
/// store at load time, not carried in the data.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaskRecord {
    pub name: String,
    pub description: String,
    pub due_date: chrono::NaiveDate,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub due_date: chrono::NaiveDate,
    pub status: Status,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Running,
    Done,
    Pending,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Project {
    pub name: String,
    pub image: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamMember {
    pub full_name: String,
    pub job: String,
    pub image: String,
}

/// Aggregate project counts consumed by the gauge chart and the stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectCounts {
    pub total: usize,
    pub completed: usize,
    pub running: usize,
    pub pending: usize,
}

pub fn project_counts(projects: &[Project]) -> ProjectCounts {
    let mut counts = ProjectCounts {
        total: projects.len(),
        ..ProjectCounts::default()
    };
    for project in projects {
        match project.status {
            ProjectStatus::Done => counts.completed += 1,
            ProjectStatus::Running => counts.running += 1,
            ProjectStatus::Pending => counts.pending += 1,
        }
    }
    counts
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Owns the ordered task collection; status changes and removals go through
/// here and nowhere else. Insertion order is load order and never reshuffled.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds the store from loaded records, assigning session-unique ids.
    pub fn load(records: Vec<TaskRecord>) -> Self {
        let mut store = TaskStore::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&mut self, record: TaskRecord) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            name: record.name,
            description: record.description,
            due_date: record.due_date,
            status: record.status,
        });
        id
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn advance_status(&mut self, id: TaskId) -> Result<Status, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.status = task.status.next();
        Ok(task.status)
    }

    pub fn set_status(&mut self, id: TaskId, status: Status) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.status = status;
        Ok(())
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    pub fn tasks_with_status(&self, status: Status) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    pub fn status_count(&self, status: Status) -> usize {
        self.tasks_with_status(status).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, status: Status) -> TaskRecord {
        TaskRecord {
            name: name.into(),
            description: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
            status,
        }
    }

    #[test]
    fn status_cycle_is_fixed() {
        assert_eq!(Status::ToDo.next(), Status::InProgress);
        assert_eq!(Status::InProgress.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Pending);
        assert_eq!(Status::Pending.next(), Status::ToDo);
    }

    #[test]
    fn load_assigns_unique_stable_ids() {
        let store = TaskStore::load(vec![
            record("a", Status::ToDo),
            record("b", Status::ToDo),
            record("c", Status::Done),
        ]);
        let ids: Vec<TaskId> = store.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut store = TaskStore::load(vec![record("a", Status::ToDo)]);
        store.remove(1).unwrap();
        let new_id = store.insert(record("b", Status::ToDo));
        assert_eq!(new_id, 2);
    }

    #[test]
    fn advance_status_follows_cycle() {
        let mut store = TaskStore::load(vec![record("a", Status::Done)]);
        assert_eq!(store.advance_status(1), Ok(Status::Pending));
        assert_eq!(store.advance_status(1), Ok(Status::ToDo));
    }

    #[test]
    fn unknown_id_is_reported_not_panicked() {
        let mut store = TaskStore::new();
        assert_eq!(store.advance_status(42), Err(StoreError::TaskNotFound(42)));
        assert_eq!(
            store.set_status(42, Status::Done),
            Err(StoreError::TaskNotFound(42))
        );
        assert!(store.remove(42).is_err());
    }

    #[test]
    fn remove_takes_exactly_one_task() {
        let mut store = TaskStore::load(vec![
            record("a", Status::ToDo),
            record("b", Status::ToDo),
        ]);
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(store.len(), 1);
        assert_eq!(store.status_count(Status::ToDo), 1);
    }

    #[test]
    fn filter_preserves_store_order() {
        let mut store = TaskStore::load(vec![
            record("a", Status::ToDo),
            record("b", Status::Done),
            record("c", Status::ToDo),
        ]);
        store.set_status(2, Status::ToDo).unwrap();
        let names: Vec<&str> = store
            .tasks_with_status(Status::ToDo)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn project_counts_bucket_by_status() {
        let projects = vec![
            Project {
                name: "p1".into(),
                image: String::new(),
                status: ProjectStatus::Done,
            },
            Project {
                name: "p2".into(),
                image: String::new(),
                status: ProjectStatus::Running,
            },
            Project {
                name: "p3".into(),
                image: String::new(),
                status: ProjectStatus::Pending,
            },
        ];
        let counts = project_counts(&projects);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.running, 1);
        assert_eq!(counts.pending, 1);
    }
}
