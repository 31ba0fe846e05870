use crate::domain::{
    apply_outcome, format_deadline_value, interpret_drop, project, today_tasks, ActiveView,
    DragOutcome, DragState, SortKey, Task, TaskStatus, TaskStore, UiMode, ViewParams,
    DEADLINE_FORMAT,
};
use crate::persistence::{
    export_to_file, import_from_file, save_metadata, AppMetadata, KeyValueStore, EXPORT_FILE_NAME,
};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

/// Fields of the task form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Status,
    Deadline,
    Note,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Status,
            FormField::Status => FormField::Deadline,
            FormField::Deadline => FormField::Note,
            FormField::Note => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Note,
            FormField::Description => FormField::Name,
            FormField::Status => FormField::Description,
            FormField::Deadline => FormField::Status,
            FormField::Note => FormField::Deadline,
        }
    }
}

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct TaskFormState {
    /// The task being edited; `None` when adding
    pub original: Option<Task>,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub deadline: String,
    pub note: String,
    pub field: FormField,
}

impl TaskFormState {
    fn blank(today: NaiveDate) -> Self {
        Self {
            original: None,
            name: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            deadline: format_deadline_value(today),
            note: String::new(),
            field: FormField::Name,
        }
    }

    fn from_task(task: &Task) -> Self {
        Self {
            original: Some(task.clone()),
            name: task.name.clone(),
            description: task.description.clone(),
            status: task.status,
            deadline: task.deadline.clone(),
            note: task.note.clone(),
            field: FormField::Name,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    /// The text buffer of the focused field (status has none)
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::Deadline => Some(&mut self.deadline),
            FormField::Note => Some(&mut self.note),
            FormField::Status => None,
        }
    }

    /// Build the task to save. Edits keep id and creation time.
    fn to_task(&self) -> std::result::Result<Task, String> {
        let unchanged_deadline = self
            .original
            .as_ref()
            .is_some_and(|t| t.deadline == self.deadline);

        let new_deadline = if unchanged_deadline {
            None
        } else {
            let date = NaiveDate::parse_from_str(self.deadline.trim(), DEADLINE_FORMAT)
                .map_err(|_| format!("deadline must be YYYY-MM-DD, got '{}'", self.deadline))?;
            Some(date)
        };

        let mut task = match &self.original {
            Some(original) => original.clone(),
            None => Task::new(String::new(), String::new(), NaiveDate::MIN),
        };
        task.name = self.name.clone();
        task.description = self.description.clone();
        task.status = self.status;
        task.note = self.note.clone();
        if let Some(date) = new_deadline {
            task.set_deadline(date);
        }
        Ok(task)
    }
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    storage: Box<dyn KeyValueStore>,
    pub ui_mode: UiMode,
    pub active_view: ActiveView,
    /// Filters of the "all" view
    pub all_params: ViewParams,
    pub sort: SortKey,
    pub today: NaiveDate,
    pub today_selected: usize,
    pub all_selected: usize,
    pub drag: DragState,
    /// Row of the today list the dragged task would land on
    pub drop_target: usize,
    pub input_form: Option<TaskFormState>,
    pub path_input: String,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: TaskStore, storage: Box<dyn KeyValueStore>, metadata: AppMetadata) -> Self {
        Self {
            store,
            storage,
            ui_mode: UiMode::Normal,
            active_view: metadata.active_view,
            all_params: ViewParams {
                search: metadata.search,
                status: metadata.status_filter,
                today_only: metadata.today_only,
                sort: Some(metadata.sort),
            },
            sort: metadata.sort,
            today: chrono::Local::now().date_naive(),
            today_selected: 0,
            all_selected: 0,
            drag: DragState::Idle,
            drop_target: 0,
            input_form: None,
            path_input: String::new(),
            status_message: None,
        }
    }

    /// Pick up a date change (the app may stay open past midnight)
    pub fn refresh_today(&mut self) {
        let now = chrono::Local::now().date_naive();
        if now != self.today {
            info!(%now, "date changed");
            self.today = now;
            self.clamp_selection();
        }
    }

    /// Current view settings, persisted in meta.json
    pub fn metadata(&self) -> AppMetadata {
        AppMetadata {
            active_view: self.active_view,
            sort: self.sort,
            status_filter: self.all_params.status,
            today_only: self.all_params.today_only,
            search: self.all_params.search.clone(),
        }
    }

    pub fn save_metadata(&self, path: PathBuf) -> Result<()> {
        save_metadata(path, &self.metadata())
    }

    pub fn needs_save(&self) -> bool {
        self.store.needs_save()
    }

    /// Write the collection to storage
    pub fn save(&mut self) -> Result<()> {
        self.store.save(self.storage.as_mut())?;
        Ok(())
    }

    // ---- projections ----

    pub fn today_view(&self) -> Vec<Task> {
        today_tasks(self.store.tasks(), self.today)
    }

    pub fn all_view(&self) -> Vec<Task> {
        project(self.store.tasks(), &self.all_params, self.today)
    }

    pub fn visible_tasks(&self) -> Vec<Task> {
        match self.active_view {
            ActiveView::Today => self.today_view(),
            ActiveView::All => self.all_view(),
        }
    }

    fn selected_index(&self) -> usize {
        match self.active_view {
            ActiveView::Today => self.today_selected,
            ActiveView::All => self.all_selected,
        }
    }

    fn set_selected_index(&mut self, idx: usize) {
        match self.active_view {
            ActiveView::Today => self.today_selected = idx,
            ActiveView::All => self.all_selected = idx,
        }
    }

    pub fn selected_task(&self) -> Option<Task> {
        self.visible_tasks().get(self.selected_index()).cloned()
    }

    /// Row index highlighted in the active list
    pub fn highlighted_row(&self) -> usize {
        if self.drag.is_dragging() {
            self.drop_target
        } else {
            self.selected_index()
        }
    }

    fn clamp_selection(&mut self) {
        let today_len = self.today_view().len();
        let all_len = self.all_view().len();
        self.today_selected = self.today_selected.min(today_len.saturating_sub(1));
        self.all_selected = self.all_selected.min(all_len.saturating_sub(1));
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // ---- navigation ----

    pub fn move_selection_up(&mut self) {
        let idx = self.selected_index();
        if idx > 0 {
            self.set_selected_index(idx - 1);
        }
    }

    pub fn move_selection_down(&mut self) {
        let idx = self.selected_index();
        if idx + 1 < self.visible_tasks().len() {
            self.set_selected_index(idx + 1);
        }
    }

    pub fn switch_view(&mut self) {
        self.active_view = self.active_view.other();
        self.clamp_selection();
    }

    // ---- store operations ----

    pub fn toggle_selected(&mut self) {
        if let Some(task) = self.selected_task() {
            self.store.toggle_status(&task.id);
            self.clamp_selection();
        }
    }

    pub fn request_delete(&mut self) {
        if self.selected_task().is_some() {
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.store.delete(&task.id);
            self.set_message(format!("deleted '{}'", task.name));
        }
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    /// Move the selected today row onto its neighbour (Shift+arrows)
    pub fn move_item(&mut self, up: bool) {
        if self.active_view != ActiveView::Today {
            return;
        }
        let rows = self.today_view();
        let idx = self.today_selected;
        let target_idx = if up { idx.checked_sub(1) } else { Some(idx + 1) };
        let (Some(dragged), Some(target)) = (rows.get(idx), target_idx.and_then(|i| rows.get(i)))
        else {
            return;
        };

        let outcome = interpret_drop(self.store.tasks(), &dragged.id, 0, Some(&target.id));
        if let Some(reordered) = apply_outcome(self.store.tasks(), &outcome) {
            self.store.reorder(reordered);
            if let Some(i) = target_idx {
                self.today_selected = i;
            }
        }
    }

    // ---- task form ----

    pub fn start_add_task(&mut self) {
        self.input_form = Some(TaskFormState::blank(self.today));
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn start_edit_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.input_form = Some(TaskFormState::from_task(&task));
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(text) = self.input_form.as_mut().and_then(|f| f.focused_text()) {
            text.push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(text) = self.input_form.as_mut().and_then(|f| f.focused_text()) {
            text.pop();
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.field = form.field.next();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.field = form.field.prev();
        }
    }

    pub fn form_cycle_status(&mut self) {
        if let Some(form) = &mut self.input_form {
            if form.field == FormField::Status {
                form.status = form.status.next();
            }
        }
    }

    /// Quick-pick: deadline = today
    pub fn form_set_deadline_today(&mut self) {
        let today = format_deadline_value(self.today);
        if let Some(form) = &mut self.input_form {
            form.deadline = today;
        }
    }

    pub fn submit_form(&mut self) {
        let (result, editing) = match &self.input_form {
            Some(form) => (form.to_task(), form.is_editing()),
            None => return,
        };

        match result {
            Ok(task) => {
                if editing {
                    self.store.update(task);
                } else {
                    self.set_message(format!("added '{}'", task.name));
                    self.store.add(task);
                }
                self.cancel_form();
                self.clamp_selection();
            }
            Err(message) => self.set_message(message),
        }
    }

    pub fn cancel_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- all-view filters ----

    pub fn start_search(&mut self) {
        self.active_view = ActiveView::All;
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_input_char(&mut self, c: char) {
        self.all_params.search.push(c);
        self.all_selected = 0;
    }

    pub fn search_backspace(&mut self) {
        self.all_params.search.pop();
        self.all_selected = 0;
    }

    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn cycle_status_filter(&mut self) {
        self.all_params.status = self.all_params.status.next();
        self.all_selected = 0;
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.all_params.sort = Some(self.sort);
    }

    pub fn toggle_today_only(&mut self) {
        self.all_params.today_only = !self.all_params.today_only;
        self.all_selected = 0;
    }

    // ---- drag ----

    /// Grab the selected row of the today list
    pub fn start_drag(&mut self) {
        if self.active_view != ActiveView::Today {
            return;
        }
        if let Some(task) = self.selected_task() {
            self.drag.start(&task.id);
            self.drop_target = self.today_selected;
            self.ui_mode = UiMode::Dragging;
        }
    }

    pub fn drag_nudge(&mut self, delta: i32) {
        self.drag.nudge(delta);
    }

    pub fn drag_target_up(&mut self) {
        self.drop_target = self.drop_target.saturating_sub(1);
    }

    pub fn drag_target_down(&mut self) {
        if self.drop_target + 1 < self.today_view().len() {
            self.drop_target += 1;
        }
    }

    /// Drop onto the highlighted row
    pub fn finish_drag(&mut self) {
        let target = self.today_view().get(self.drop_target).map(|t| t.id.clone());
        let outcome = self.drag.drop_on(self.store.tasks(), target.as_deref());
        self.ui_mode = UiMode::Normal;

        if let Some(updated) = apply_outcome(self.store.tasks(), &outcome) {
            self.store.reorder(updated);
        }

        match outcome {
            DragOutcome::Reclassify { status, .. } => {
                self.set_message(format!("marked {}", status.label()));
            }
            DragOutcome::Reorder { .. } => self.today_selected = self.drop_target,
            DragOutcome::Cancelled => {}
        }
        self.clamp_selection();
    }

    /// Release outside the list
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
        self.ui_mode = UiMode::Normal;
    }

    // ---- import / export ----

    pub fn export(&mut self) {
        match export_to_file(self.store.tasks(), EXPORT_FILE_NAME) {
            Ok(()) => self.set_message(format!(
                "exported {} tasks to {}",
                self.store.len(),
                EXPORT_FILE_NAME
            )),
            Err(e) => {
                warn!(error = %e, "export failed");
                self.set_message(format!("export failed: {e:#}"));
            }
        }
    }

    pub fn start_import(&mut self) {
        self.path_input = EXPORT_FILE_NAME.to_string();
        self.ui_mode = UiMode::ImportPath;
    }

    pub fn path_input_char(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn path_backspace(&mut self) {
        self.path_input.pop();
    }

    pub fn cancel_import(&mut self) {
        self.path_input.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Replace the collection with the file's tasks, or report why not
    pub fn submit_import(&mut self) {
        let path = std::mem::take(&mut self.path_input);
        self.ui_mode = UiMode::Normal;

        match import_from_file(path.trim()) {
            Ok(tasks) => {
                info!(count = tasks.len(), path = %path, "imported tasks");
                self.set_message(format!("imported {} tasks", tasks.len()));
                self.store.replace_all(tasks);
                self.today_selected = 0;
                self.all_selected = 0;
            }
            Err(e) => {
                warn!(error = %e, path = %path, "import rejected");
                self.set_message(format!("import rejected: {e}"));
            }
        }
    }
}
