use crate::app::AppState;
use crate::domain::{ActiveView, UiMode};
use crate::ui::styles::{hint_style, message_style};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the current mode and view
pub fn keybinding_hints(app: &AppState) -> &'static str {
    match app.ui_mode {
        UiMode::Dragging => " ←/→ drag sideways (done / in progress)   ↑/↓ drop row   Enter drop   Esc cancel",
        UiMode::AddingTask | UiMode::EditingTask => " Tab field   Enter save   Esc cancel",
        UiMode::Searching => " type to search   Enter/Esc done",
        UiMode::ImportPath => " Enter import   Esc cancel",
        UiMode::ConfirmDelete => " y delete   n keep",
        UiMode::Normal => match app.active_view {
            ActiveView::Today => {
                " ↑/↓ select   Shift+↑/↓ reorder   g drag   space complete   a add   e edit   x delete   Tab all   w export   i import   q quit"
            }
            ActiveView::All => {
                " ↑/↓ select   / search   s status   o sort   t today   space complete   a add   e edit   x delete   Tab today   q quit"
            }
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(keybinding_hints(app))).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the status line (last action result, or the drag readout)
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let text = if app.drag.is_dragging() {
        format!(" dragging · displacement {:+}", app.drag.displacement())
    } else {
        app.status_message
            .as_deref()
            .map(|m| format!(" {}", m))
            .unwrap_or_default()
    };
    f.render_widget(Paragraph::new(text).style(message_style()), area);
}
