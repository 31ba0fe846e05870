use crate::app::AppState;
use crate::domain::{format_created, format_deadline, toggle_label};
use crate::ui::styles::{border_style, default_style, status_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ", title_style()),
            Span::raw(task.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", title_style()),
            Span::styled(task.status.label(), status_style(task.status)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Created:  ", title_style()),
            Span::raw(format_created(&task)),
        ]),
        Line::from(vec![
            Span::styled("Deadline: ", title_style()),
            Span::raw(format_deadline(&task)),
        ]),
        Line::raw(""),
    ];

    if !task.description.trim().is_empty() {
        lines.push(Line::from(Span::styled("Description:", title_style())));
        for text in task.description.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
    }

    if !task.note.trim().is_empty() {
        lines.push(Line::from(Span::styled("Note:", title_style())));
        for text in task.note.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
    } else {
        lines.push(Line::from(Span::styled("Note: (empty)", default_style())));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw(format!("[space] {}", toggle_label(task.status))));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
