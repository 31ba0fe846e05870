use crate::app::{AppState, FormField};
use crate::domain::{UiMode, DRAG_STEP};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::ImportPath => handle_import_path_mode(app, key),
        UiMode::Dragging => handle_drag_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_item(true);
            } else {
                app.move_selection_up();
            }
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_item(false);
            } else {
                app.move_selection_down();
            }
        }

        KeyCode::Tab | KeyCode::BackTab => app.switch_view(),

        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Enter => app.start_edit_task(),
        KeyCode::Char(' ') | KeyCode::Char('c') => app.toggle_selected(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),

        // Grab for drag (today view)
        KeyCode::Char('g') => app.start_drag(),

        // All-view filters
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Char('o') => app.cycle_sort(),
        KeyCode::Char('t') => app.toggle_today_only(),

        KeyCode::Char('w') => app.export(),
        KeyCode::Char('i') => app.start_import(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while the task form is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let on_status = app
        .input_form
        .as_ref()
        .is_some_and(|f| f.field == FormField::Status);

    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => app.form_next_field(),
        KeyCode::BackTab => app.form_prev_field(),
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_set_deadline_today();
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_status => {
            app.form_cycle_status();
        }
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.finish_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_input_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_import_path_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_import(),
        KeyCode::Esc => app.cancel_import(),
        KeyCode::Backspace => app.path_backspace(),
        KeyCode::Char(c) => app.path_input_char(c),
        _ => {}
    }
    Ok(false)
}

/// Keyboard drag: ←/→ build up displacement, ↑/↓ pick the drop row
fn handle_drag_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Left => app.drag_nudge(-DRAG_STEP),
        KeyCode::Right => app.drag_nudge(DRAG_STEP),
        KeyCode::Up => app.drag_target_up(),
        KeyCode::Down => app.drag_target_down(),
        KeyCode::Enter | KeyCode::Char('g') => app.finish_drag(),
        KeyCode::Esc => app.cancel_drag(),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => app.ui_mode = UiMode::Normal,
        _ => {}
    }
    Ok(false)
}
