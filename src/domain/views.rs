use super::enums::{SortKey, StatusFilter, TaskStatus};
use super::task::Task;
use chrono::{Local, NaiveDate};
use std::cmp::Ordering;

/// Parameters of a projection of the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    /// Case-insensitive substring matched against name or description
    pub search: String,
    pub status: StatusFilter,
    /// Only tasks whose deadline is the supplied "today"
    pub today_only: bool,
    /// `None` keeps collection order
    pub sort: Option<SortKey>,
}

impl ViewParams {
    /// Parameters for the "today" view: today-scoped, collection order
    pub fn today() -> Self {
        Self {
            today_only: true,
            ..Self::default()
        }
    }
}

/// Filter then sort the collection. The input is never modified.
pub fn project(tasks: &[Task], params: &ViewParams, today: NaiveDate) -> Vec<Task> {
    let needle = params.search.to_lowercase();

    let mut projected: Vec<Task> = tasks
        .iter()
        .filter(|task| !params.today_only || task.is_due_on(today))
        .filter(|task| matches_search(task, &needle))
        .filter(|task| params.status.matches(task.status))
        .cloned()
        .collect();

    if let Some(key) = params.sort {
        // sort_by is stable, so equal keys keep collection order
        projected.sort_by(|a, b| compare_by(a, b, key));
    }

    projected
}

/// The "today" view: tasks due today, in collection order
pub fn today_tasks(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    project(tasks, &ViewParams::today(), today)
}

fn matches_search(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.name.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
}

/// Ascending by key; an unparsable key sorts after every valid one
fn compare_by(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedTime => invalid_last(a.created_at(), b.created_at()),
        SortKey::Deadline => invalid_last(a.deadline_date(), b.deadline_date()),
    }
}

fn invalid_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Shown in place of a date that cannot be parsed
pub const INVALID_DATE: &str = "invalid date";

/// Creation time as dd/mm/YYYY HH:MM in local time
pub fn format_created(task: &Task) -> String {
    task.created_at()
        .map(|ts| ts.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Deadline as dd/mm/YYYY
pub fn format_deadline(task: &Task) -> String {
    task.deadline_date()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Get status badge text
pub fn status_badge(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○ pending",
        TaskStatus::InProgress => "◐ in progress",
        TaskStatus::Done => "✓ done",
        TaskStatus::Cancelled => "✗ cancelled",
    }
}

/// Label of the toggle action for a task ("undo" for done tasks)
pub fn toggle_label(status: TaskStatus) -> &'static str {
    if status == TaskStatus::Done {
        "undo"
    } else {
        "complete"
    }
}
