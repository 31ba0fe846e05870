use super::enums::TaskStatus;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar format used for deadlines on disk
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A single to-do item.
///
/// Dates are kept as the strings that were read so that an imported document
/// with an odd date survives a save/export unchanged. Use [`Task::created_at`]
/// and [`Task::deadline_date`] to get parsed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    /// RFC 3339 timestamp, set once at creation
    #[serde(rename = "createdTime")]
    pub created_time: String,
    /// Calendar date (YYYY-MM-DD)
    pub deadline: String,
    #[serde(default)]
    pub note: String,
}

impl Task {
    /// Create a fresh pending task due on `deadline`, created now
    pub fn new(name: String, description: String, deadline: NaiveDate) -> Self {
        Self {
            id: new_task_id(),
            name,
            description,
            status: TaskStatus::Pending,
            created_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            deadline: format_deadline_value(deadline),
            note: String::new(),
        }
    }

    /// Parsed creation time, `None` if the stored value is not a valid timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_time)
    }

    /// Parsed deadline date, `None` if the stored value is not a valid date
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        parse_date(&self.deadline)
    }

    pub fn set_deadline(&mut self, date: NaiveDate) {
        self.deadline = format_deadline_value(date);
    }

    /// Whether the deadline falls on `today`
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.deadline_date() == Some(today)
    }

    /// Copy of this task with a different status
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Mint a new collection-unique identifier
pub fn new_task_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn format_deadline_value(date: NaiveDate) -> String {
    date.format(DEADLINE_FORMAT).to_string()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    // A bare date is read as midnight UTC
    NaiveDate::parse_from_str(value, DEADLINE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DEADLINE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Write report".to_string(), String::new(), date(2024, 5, 1));

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.deadline, "2024-05-01");
        assert!(task.note.is_empty());
        assert!(task.created_at().is_some());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_new_tasks_get_distinct_ids() {
        let a = Task::new("a".to_string(), String::new(), date(2024, 5, 1));
        let b = Task::new("b".to_string(), String::new(), date(2024, 5, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "id": "x",
            "name": "hello",
            "description": "",
            "status": "in progress",
            "createdTime": "2024-05-01T09:30:00.000Z",
            "deadline": "2024-05-02"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.note, "");
        assert_eq!(task.deadline_date(), Some(date(2024, 5, 2)));

        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdTime").is_some());
        assert!(value.get("created_time").is_none());
    }

    #[test]
    fn test_deadline_accepts_full_timestamp() {
        let mut task = Task::new("t".to_string(), String::new(), date(2024, 1, 1));
        task.deadline = "2024-03-04T23:59:59.999Z".to_string();
        assert_eq!(task.deadline_date(), Some(date(2024, 3, 4)));
    }

    #[test]
    fn test_unparsable_dates_are_none() {
        let mut task = Task::new("t".to_string(), String::new(), date(2024, 1, 1));
        task.deadline = "someday".to_string();
        task.created_time = "yesterday-ish".to_string();

        assert_eq!(task.deadline_date(), None);
        assert_eq!(task.created_at(), None);
        assert!(!task.is_due_on(date(2024, 1, 1)));
    }

    #[test]
    fn test_with_status_keeps_other_fields() {
        let task = Task::new("t".to_string(), "d".to_string(), date(2024, 1, 1));
        let done = task.with_status(TaskStatus::Done);

        assert_eq!(done.status, TaskStatus::Done);
        assert_eq!(done.id, task.id);
        assert_eq!(done.created_time, task.created_time);
    }
}
