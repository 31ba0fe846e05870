use super::task::Task;
use crate::error::StorageError;
use crate::persistence::{load_tasks, save_tasks, KeyValueStore, TASKS_KEY};
use tracing::{debug, info, warn};

/// The ordered task collection and the single owner of it.
///
/// Mutations never touch storage directly; they set a dirty flag and the
/// owner calls [`TaskStore::save`] once per handled event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    needs_save: bool,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            needs_save: false,
        }
    }

    /// Read the collection once at startup.
    ///
    /// A corrupt stored value is backed up and the session starts empty
    /// rather than refusing to run.
    pub fn load(storage: &mut dyn KeyValueStore) -> Result<Self, StorageError> {
        match load_tasks(storage) {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks");
                Ok(Self::new(tasks))
            }
            Err(StorageError::Corrupt { source, .. }) => {
                let backup = storage.backup(TASKS_KEY)?;
                warn!(
                    error = %source,
                    backup = backup.as_deref().unwrap_or("-"),
                    "stored tasks are unreadable, starting empty"
                );
                Ok(Self::new(Vec::new()))
            }
            Err(e) => Err(e),
        }
    }

    /// Write the collection and clear the dirty flag
    pub fn save(&mut self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_tasks(storage, &self.tasks)?;
        self.needs_save = false;
        Ok(())
    }

    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task. The caller supplies a fresh id.
    pub fn add(&mut self, task: Task) {
        debug!(id = %task.id, "add task");
        self.tasks.push(task);
        self.needs_save = true;
    }

    /// Replace the task with the same id, keeping its position.
    /// Only a real change marks the collection dirty.
    pub fn update(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            if *slot == task {
                return;
            }
            debug!(id = %task.id, "update task");
            *slot = task;
            self.needs_save = true;
        }
    }

    pub fn delete(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            debug!(id, "delete task");
            self.needs_save = true;
        }
    }

    /// Flip done <-> in progress; pending and cancelled stay as they are
    pub fn toggle_status(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            let toggled = task.status.toggled();
            if toggled != task.status {
                debug!(id, from = task.status.label(), to = toggled.label(), "toggle status");
                task.status = toggled;
                self.needs_save = true;
            }
        }
    }

    /// Replace the whole sequence. No validation: the caller hands in a
    /// permutation or a status-mutated copy of the current sequence.
    pub fn reorder(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.needs_save = true;
    }

    /// Replace the collection with an imported one
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        info!(count = tasks.len(), replaced = self.tasks.len(), "replacing collection");
        self.tasks = tasks;
        self.needs_save = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use crate::persistence::transfer::{export_json, import_json};
    use crate::persistence::MemoryStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + chrono::Duration::days(offset)
    }

    fn task(id: &str, status: TaskStatus) -> Task {
        let mut t = Task::new(id.to_uppercase(), String::new(), day(0));
        t.id = id.to_string();
        t.status = status;
        t
    }

    fn ids(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = TaskStore::default();
        store.add(task("a", TaskStatus::Pending));
        store.add(task("b", TaskStatus::Pending));

        assert_eq!(ids(&store), vec!["a", "b"]);
        assert!(store.needs_save());
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = TaskStore::new(vec![
            task("a", TaskStatus::Pending),
            task("b", TaskStatus::Pending),
            task("c", TaskStatus::Pending),
        ]);
        let mut edited = store.get("b").unwrap().clone();
        edited.name = "renamed".to_string();
        store.update(edited);

        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        assert_eq!(store.get("b").unwrap().name, "renamed");
    }

    #[test]
    fn test_identical_update_stays_clean() {
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Pending)]);
        let same = store.get("a").unwrap().clone();
        store.update(same);

        assert!(!store.needs_save());

        let mut edited = store.get("a").unwrap().clone();
        edited.note = "call first".to_string();
        store.update(edited);
        assert!(store.needs_save());
    }

    #[test]
    fn test_missing_id_is_silent_noop() {
        let original = TaskStore::new(vec![task("a", TaskStatus::Done)]);
        let mut store = original.clone();

        store.update(task("zzz", TaskStatus::Pending));
        store.delete("zzz");
        store.toggle_status("zzz");

        assert_eq!(store, original);
        assert!(!store.needs_save());
    }

    #[test]
    fn test_delete_removes_task() {
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Pending), task("b", TaskStatus::Done)]);
        store.delete("a");
        assert_eq!(ids(&store), vec!["b"]);
    }

    #[test]
    fn test_toggle_twice_restores_status() {
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Done), task("b", TaskStatus::InProgress)]);

        store.toggle_status("a");
        store.toggle_status("b");
        assert_eq!(store.get("a").unwrap().status, TaskStatus::InProgress);
        assert_eq!(store.get("b").unwrap().status, TaskStatus::Done);

        store.toggle_status("a");
        store.toggle_status("b");
        assert_eq!(store.get("a").unwrap().status, TaskStatus::Done);
        assert_eq!(store.get("b").unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_toggle_leaves_pending_and_cancelled() {
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Pending), task("c", TaskStatus::Cancelled)]);

        store.toggle_status("a");
        store.toggle_status("c");

        assert_eq!(store.get("a").unwrap().status, TaskStatus::Pending);
        assert_eq!(store.get("c").unwrap().status, TaskStatus::Cancelled);
        assert!(!store.needs_save());
    }

    #[test]
    fn test_replay_matches_reference_sequence() {
        enum Op {
            Add(Task),
            Update(Task),
            Delete(&'static str),
            Toggle(&'static str),
        }

        let mut renamed = task("b", TaskStatus::InProgress);
        renamed.name = "B2".to_string();
        let ops = vec![
            Op::Add(task("a", TaskStatus::Pending)),
            Op::Add(task("b", TaskStatus::InProgress)),
            Op::Add(task("c", TaskStatus::Done)),
            Op::Toggle("b"),
            Op::Update(renamed),
            Op::Toggle("a"),
            Op::Delete("c"),
            Op::Toggle("missing"),
        ];

        let mut store = TaskStore::default();
        let mut reference: Vec<Task> = Vec::new();
        for op in ops {
            match op {
                Op::Add(t) => {
                    reference.push(t.clone());
                    store.add(t);
                }
                Op::Update(t) => {
                    for r in reference.iter_mut().filter(|r| r.id == t.id) {
                        *r = t.clone();
                    }
                    store.update(t);
                }
                Op::Delete(id) => {
                    reference.retain(|r| r.id != id);
                    store.delete(id);
                }
                Op::Toggle(id) => {
                    for r in reference.iter_mut().filter(|r| r.id == id) {
                        r.status = match r.status {
                            TaskStatus::Done => TaskStatus::InProgress,
                            TaskStatus::InProgress => TaskStatus::Done,
                            other => other,
                        };
                    }
                    store.toggle_status(id);
                }
            }
        }

        assert_eq!(store.tasks(), reference.as_slice());
        // "b" was toggled to done and then replaced by an in-progress edit
        assert_eq!(store.get("b").unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_today_task_toggle_scenario() {
        let mut a = task("a", TaskStatus::Pending);
        a.set_deadline(day(0));
        let mut b = task("b", TaskStatus::Pending);
        b.set_deadline(day(1));
        let mut store = TaskStore::new(vec![a, b]);

        store.toggle_status("a");
        assert_eq!(store.get("a").unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_import_replaces_everything() {
        let mut store = TaskStore::new(vec![task("a", TaskStatus::Pending), task("b", TaskStatus::Done)]);
        let imported = import_json(
            r#"[{"id":"x","name":"hello","description":"","status":"done",
                "createdTime":"2024-01-01T08:00:00.000Z","deadline":"2024-01-01","note":""}]"#,
        )
        .unwrap();

        store.replace_all(imported);

        assert_eq!(ids(&store), vec!["x"]);
        assert!(store.get("a").is_none());
        assert_eq!(store.get("x").unwrap().name, "hello");
    }

    #[test]
    fn test_export_import_round_trip_through_store() {
        let store = TaskStore::new(vec![task("a", TaskStatus::Pending), task("b", TaskStatus::Cancelled)]);
        let mut restored = TaskStore::default();

        restored.replace_all(import_json(&export_json(store.tasks()).unwrap()).unwrap());
        assert_eq!(restored.tasks(), store.tasks());
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStore::new();
        let mut store = TaskStore::default();
        store.add(task("a", TaskStatus::Pending));

        store.save(&mut storage).unwrap();
        assert!(!store.needs_save());

        let loaded = TaskStore::load(&mut storage).unwrap();
        assert_eq!(loaded.tasks(), store.tasks());
    }

    #[test]
    fn test_load_corrupt_starts_empty_and_keeps_backup() {
        let mut storage = MemoryStore::new();
        storage.set(TASKS_KEY, "[{\"id\": 1}]").unwrap();

        let store = TaskStore::load(&mut storage).unwrap();

        assert!(store.is_empty());
        assert_eq!(storage.get("tasks.bak").unwrap().as_deref(), Some("[{\"id\": 1}]"));
    }
}
