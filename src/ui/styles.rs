use crate::domain::TaskStatus;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Row being dragged
pub fn dragging_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

/// Drop target while dragging
pub fn drop_target_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::UNDERLINED)
}

/// Badge color per status
pub fn status_style(status: TaskStatus) -> Style {
    let color = match status {
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::Cancelled => Color::Red,
        TaskStatus::Done => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Muted text (dates, descriptions)
pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Status line style
pub fn message_style() -> Style {
    Style::default().fg(Color::LightYellow)
}
