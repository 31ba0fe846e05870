use crate::app::{AppState, FormField, TaskFormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, status_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the task form for adding or editing
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let modal_area = create_modal_area(area, 20);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_text = if form.is_editing() { " edit " } else { " add new " };

    let mut lines = vec![Line::raw("")];
    push_text_field(&mut lines, form, FormField::Name, "name", &form.name);
    push_text_field(&mut lines, form, FormField::Description, "description", &form.description);

    // Status selector
    let focused = form.field == FormField::Status;
    lines.push(Line::raw(field_label("status", focused, "(←/→ to change)")));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(form.status.label(), status_style(form.status)),
    ]));
    lines.push(Line::raw(""));

    push_text_field(&mut lines, form, FormField::Deadline, "deadline (YYYY-MM-DD, Ctrl+T today)", &form.deadline);
    push_text_field(&mut lines, form, FormField::Note, "note", &form.note);

    lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));
    if let Some(message) = &app.status_message {
        lines.push(Line::from(Span::styled(message.clone(), modal_title_style())));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn field_label(name: &str, focused: bool, hint: &str) -> String {
    if focused {
        format!("{}: {} (editing)", name, hint)
    } else {
        format!("{}:", name)
    }
}

fn push_text_field(
    lines: &mut Vec<Line<'static>>,
    form: &TaskFormState,
    field: FormField,
    name: &str,
    value: &str,
) {
    let focused = form.field == field;
    lines.push(Line::raw(field_label(name, focused, "")));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));
}
