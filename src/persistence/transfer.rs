use super::files::atomic_write;
use crate::domain::Task;
use crate::error::{json_kind, ImportError};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Serialize the collection as a pretty-printed JSON array, in collection order
pub fn export_json(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Write an export file atomically
pub fn export_to_file<P: AsRef<Path>>(tasks: &[Task], path: P) -> Result<()> {
    let path = path.as_ref();
    let json = export_json(tasks)?;
    atomic_write(path, &json)?;
    info!(count = tasks.len(), path = %path.display(), "exported tasks");
    Ok(())
}

/// Parse and validate an import document.
///
/// Every element must have the task shape and ids must be unique. Any
/// violation rejects the whole document.
pub fn import_json(text: &str) -> Result<Vec<Task>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(ImportError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let task: Task = serde_json::from_value(element)
            .map_err(|source| ImportError::InvalidTask { index, source })?;
        if !seen.insert(task.id.clone()) {
            return Err(ImportError::DuplicateId { id: task.id, index });
        }
        tasks.push(task);
    }

    Ok(tasks)
}

/// Read a file and validate it as an import document
pub fn import_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, ImportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    import_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_tasks() -> Vec<Task> {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut a = Task::new("alpha".to_string(), "first".to_string(), day);
        a.note = "remember".to_string();
        let mut b = Task::new("beta".to_string(), String::new(), day);
        b.status = TaskStatus::Cancelled;
        b.deadline = "not a date".to_string();
        vec![a, b]
    }

    #[test]
    fn test_export_then_import_reproduces_collection() {
        let tasks = sample_tasks();
        let json = export_json(&tasks).unwrap();
        assert_eq!(import_json(&json).unwrap(), tasks);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let json = export_json(&sample_tasks()).unwrap();
        assert!(json.starts_with("[\n  {"));
        assert!(json.contains("\"createdTime\""));
    }

    #[test]
    fn test_import_minimal_document() {
        let json = r#"[{"id":"x","name":"hello","description":"","status":"done",
            "createdTime":"2024-01-01T00:00:00.000Z","deadline":"2024-01-02"}]"#;
        let tasks = import_json(json).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "x");
        assert_eq!(tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(import_json("[{"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = import_json(r#"{"tasks": []}"#).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray { found: "an object" }));
    }

    #[test]
    fn test_import_rejects_wrong_shape() {
        let json = r#"[{"id":"x","name":"hello","description":"","status":"done",
            "createdTime":"2024-01-01T00:00:00.000Z","deadline":"2024-01-02"},
            {"id":"y","name":"no status"}]"#;
        let err = import_json(json).unwrap_err();
        assert!(matches!(err, ImportError::InvalidTask { index: 1, .. }));
    }

    #[test]
    fn test_import_rejects_unknown_status() {
        let json = r#"[{"id":"x","name":"n","description":"","status":"blocked",
            "createdTime":"2024-01-01T00:00:00.000Z","deadline":"2024-01-02"}]"#;
        assert!(matches!(import_json(json), Err(ImportError::InvalidTask { index: 0, .. })));
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut tasks = sample_tasks();
        tasks[1].id = tasks[0].id.clone();
        let json = export_json(&tasks).unwrap();

        let err = import_json(&json).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateId { index: 1, .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let tasks = sample_tasks();

        export_to_file(&tasks, &path).unwrap();
        assert_eq!(import_from_file(&path).unwrap(), tasks);
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = import_from_file(temp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
