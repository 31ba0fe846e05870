use serde::{Deserialize, Serialize};

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress", alias = "in_progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl TaskStatus {
    /// Parse a status from user input ("in progress", "in_progress", "DONE", ...)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "pending" => Some(Self::Pending),
            "in progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Display label, identical to the wire name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// The quick "did I finish this" flip. Only done and in-progress tasks move.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Done => Self::InProgress,
            Self::InProgress => Self::Done,
            other => *other,
        }
    }

    /// Next status in form order (used by the status selector)
    pub fn next(&self) -> Self {
        match self {
            Self::InProgress => Self::Pending,
            Self::Pending => Self::Cancelled,
            Self::Cancelled => Self::Done,
            Self::Done => Self::InProgress,
        }
    }

    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::InProgress,
            TaskStatus::Pending,
            TaskStatus::Cancelled,
            TaskStatus::Done,
        ]
    }
}

/// Status filter for the "all" view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// Cycle all -> in progress -> pending -> cancelled -> done -> all
    pub fn next(&self) -> Self {
        let statuses = TaskStatus::all();
        match self {
            StatusFilter::All => StatusFilter::Only(statuses[0]),
            StatusFilter::Only(status) => {
                match statuses.iter().position(|s| s == status) {
                    Some(idx) if idx + 1 < statuses.len() => StatusFilter::Only(statuses[idx + 1]),
                    _ => StatusFilter::All,
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.label(),
        }
    }

    /// Parse "all" or any status label
    pub fn from_label(label: &str) -> Option<Self> {
        if label.trim().eq_ignore_ascii_case("all") {
            return Some(StatusFilter::All);
        }
        TaskStatus::from_label(label).map(StatusFilter::Only)
    }
}

/// Sort key for the "all" view (always ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedTime,
    Deadline,
}

impl SortKey {
    pub fn next(&self) -> Self {
        match self {
            SortKey::CreatedTime => SortKey::Deadline,
            SortKey::Deadline => SortKey::CreatedTime,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedTime => "created time",
            SortKey::Deadline => "deadline",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "created" | "created time" | "createdtime" => Some(SortKey::CreatedTime),
            "deadline" => Some(SortKey::Deadline),
            _ => None,
        }
    }
}

/// Which tab is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Today,
    All,
}

impl ActiveView {
    pub fn other(&self) -> Self {
        match self {
            ActiveView::Today => ActiveView::All,
            ActiveView::All => ActiveView::Today,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Searching,
    ImportPath,
    Dragging,
    ConfirmDelete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in progress\"");
        assert_eq!(serde_json::to_string(&TaskStatus::Cancelled).unwrap(), "\"cancelled\"");

        let parsed: TaskStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_status_from_label() {
        assert_eq!(TaskStatus::from_label("DONE"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::from_label("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_label("nope"), None);
    }

    #[test]
    fn test_toggled_only_flips_done_and_in_progress() {
        assert_eq!(TaskStatus::Done.toggled(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Done);
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Cancelled.toggled(), TaskStatus::Cancelled);
    }

    #[test]
    fn test_status_filter_cycle_returns_to_all() {
        let mut filter = StatusFilter::All;
        for _ in 0..TaskStatus::all().len() {
            filter = filter.next();
            assert_ne!(filter, StatusFilter::All);
        }
        assert_eq!(filter.next(), StatusFilter::All);
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(TaskStatus::Cancelled));
        assert!(StatusFilter::Only(TaskStatus::Done).matches(TaskStatus::Done));
        assert!(!StatusFilter::Only(TaskStatus::Done).matches(TaskStatus::Pending));
    }

    #[test]
    fn test_sort_key_from_label() {
        assert_eq!(SortKey::from_label("created_time"), Some(SortKey::CreatedTime));
        assert_eq!(SortKey::from_label("Deadline"), Some(SortKey::Deadline));
        assert_eq!(SortKey::from_label("name"), None);
    }
}
