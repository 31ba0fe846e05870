//! Drag gestures on the "today" list.
//!
//! A single horizontal-and-vertical drag means one of two things. A large
//! horizontal excursion reclassifies the task (right: done, left: in
//! progress) without moving it. Anything smaller is a vertical reorder onto
//! the row it was dropped on.

use super::enums::TaskStatus;
use super::task::Task;
use tracing::debug;

/// Horizontal displacement beyond which a drop changes status.
/// Strictly greater: exactly 500 still reorders.
pub const STATUS_DRAG_THRESHOLD: i32 = 500;

/// Displacement added per key press when dragging from the keyboard
pub const DRAG_STEP: i32 = 100;

/// What a drop does to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Move the task at `from` to `to` (indices into the full collection)
    Reorder { from: usize, to: usize },
    /// Set one task's status, positions unchanged
    Reclassify { id: String, status: TaskStatus },
    /// Nothing happens
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { task_id: String, displacement: i32 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<&str> {
        match self {
            DragState::Dragging { task_id, .. } => Some(task_id.as_str()),
            DragState::Idle => None,
        }
    }

    pub fn displacement(&self) -> i32 {
        match self {
            DragState::Dragging { displacement, .. } => *displacement,
            DragState::Idle => 0,
        }
    }

    /// Begin dragging `task_id` with the displacement reset to zero
    pub fn start(&mut self, task_id: &str) {
        *self = DragState::Dragging {
            task_id: task_id.to_string(),
            displacement: 0,
        };
    }

    /// Add to the displacement (keyboard drags move in steps)
    pub fn nudge(&mut self, delta: i32) {
        if let DragState::Dragging { displacement, .. } = self {
            *displacement = displacement.saturating_add(delta);
        }
    }

    /// Release outside any target
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    /// Drop onto `target` (the id of the row under the pointer, if any).
    /// Always returns to idle.
    pub fn drop_on(&mut self, tasks: &[Task], target: Option<&str>) -> DragOutcome {
        let outcome = match std::mem::take(self) {
            DragState::Dragging {
                task_id,
                displacement,
            } => interpret_drop(tasks, &task_id, displacement, target),
            DragState::Idle => DragOutcome::Cancelled,
        };
        debug!(?outcome, "drag dropped");
        outcome
    }
}

/// Classify a drop. Checked in order: unresolved target, right
/// excursion, left excursion, vertical reorder.
///
/// A drop with no target is cancelled even past the status threshold;
/// a sideways drag only reclassifies when released over the list.
pub fn interpret_drop(
    tasks: &[Task],
    dragged_id: &str,
    displacement: i32,
    target: Option<&str>,
) -> DragOutcome {
    let Some(target_id) = target else {
        return DragOutcome::Cancelled;
    };
    let Some(from) = tasks.iter().position(|t| t.id == dragged_id) else {
        return DragOutcome::Cancelled;
    };

    if displacement > STATUS_DRAG_THRESHOLD {
        return DragOutcome::Reclassify {
            id: dragged_id.to_string(),
            status: TaskStatus::Done,
        };
    }
    if displacement < -STATUS_DRAG_THRESHOLD {
        return DragOutcome::Reclassify {
            id: dragged_id.to_string(),
            status: TaskStatus::InProgress,
        };
    }

    match tasks.iter().position(|t| t.id == target_id) {
        Some(to) if to != from => DragOutcome::Reorder { from, to },
        _ => DragOutcome::Cancelled,
    }
}

/// The sequence a drop produces, or `None` when nothing changes
pub fn apply_outcome(tasks: &[Task], outcome: &DragOutcome) -> Option<Vec<Task>> {
    match outcome {
        DragOutcome::Reorder { from, to } => {
            if *from >= tasks.len() || *to >= tasks.len() {
                return None;
            }
            let mut reordered = tasks.to_vec();
            let moved = reordered.remove(*from);
            reordered.insert(*to, moved);
            Some(reordered)
        }
        DragOutcome::Reclassify { id, status } => {
            let idx = tasks.iter().position(|t| &t.id == id)?;
            let mut reclassified = tasks.to_vec();
            reclassified[idx] = tasks[idx].with_status(*status);
            Some(reclassified)
        }
        DragOutcome::Cancelled => None,
    }
}
