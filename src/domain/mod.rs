pub mod drag;
pub mod enums;
pub mod store;
pub mod task;
pub mod views;

pub use drag::{apply_outcome, interpret_drop, DragOutcome, DragState, DRAG_STEP};
pub use enums::{ActiveView, SortKey, StatusFilter, TaskStatus, UiMode};
pub use store::TaskStore;
pub use task::{format_deadline_value, Task, DEADLINE_FORMAT};
pub use views::{
    format_created, format_deadline, project, status_badge, today_tasks, toggle_label, ViewParams,
};
