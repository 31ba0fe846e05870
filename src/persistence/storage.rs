//! Local key-value store holding the serialized task list.
//!
//! The store is a mirror with no mutation rights of its own: it is read once
//! at startup and written whenever the task store is dirty.

use super::files::{backup_file, write_atomically};
use crate::domain::Task;
use crate::error::StorageError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Key under which the task list is stored
pub const TASKS_KEY: &str = "tasks";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Move the current value of `key` somewhere safe, returning where it went
    fn backup(&mut self, key: &str) -> Result<Option<String>, StorageError>;
}

/// One `<key>.json` file per key inside the data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        write_atomically(&self.path_for(key), value).map_err(io_err)
    }

    fn backup(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let backup = backup_file(&path).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(backup.display().to_string()))
    }
}

/// Process-local store; nothing outlives the session
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backup(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(value) = self.values.get(key).cloned() else {
            return Ok(None);
        };
        let backup_key = format!("{key}.bak");
        self.values.insert(backup_key.clone(), value);
        Ok(Some(backup_key))
    }
}

/// Read the task list. An absent key is an empty list.
pub fn load_tasks(store: &dyn KeyValueStore) -> Result<Vec<Task>, StorageError> {
    let Some(raw) = store.get(TASKS_KEY)? else {
        debug!("no stored tasks, starting empty");
        return Ok(Vec::new());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
        key: TASKS_KEY.to_string(),
        source,
    })
}

/// Write the full task list
pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<(), StorageError> {
    let json = serde_json::to_string(tasks).map_err(StorageError::Encode)?;
    store.set(TASKS_KEY, &json)?;
    debug!(count = tasks.len(), "saved tasks");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_tasks() -> Vec<Task> {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut second = Task::new("second".to_string(), "b".to_string(), day);
        second.status = TaskStatus::Done;
        vec![Task::new("first".to_string(), "a".to_string(), day), second]
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert!(load_tasks(&store).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("nested"));
        let tasks = sample_tasks();

        save_tasks(&mut store, &tasks).unwrap();
        assert!(store.path_for(TASKS_KEY).exists());
        assert_eq!(load_tasks(&store).unwrap(), tasks);
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "{ not a list").unwrap();

        let err = load_tasks(&store).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_file_store_backup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());
        assert_eq!(store.backup(TASKS_KEY).unwrap(), None);

        store.set(TASKS_KEY, "garbage").unwrap();
        let backup = store.backup(TASKS_KEY).unwrap().unwrap();
        assert_eq!(fs::read_to_string(backup).unwrap(), "garbage");
    }

    #[test]
    fn test_memory_store_backup() {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "garbage").unwrap();

        let backup_key = store.backup(TASKS_KEY).unwrap().unwrap();
        assert_eq!(store.get(&backup_key).unwrap().as_deref(), Some("garbage"));
    }
}
