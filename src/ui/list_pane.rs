use crate::app::AppState;
use crate::domain::{format_deadline, status_badge, ActiveView, Task};
use crate::ui::filter_bar::render_filter_bar;
use crate::ui::layout::split_filter_bar;
use crate::ui::styles::{
    border_style, default_style, drop_target_style, dragging_style, muted_style, selected_style,
    status_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the list for the active view
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    match app.active_view {
        ActiveView::Today => {
            let date = app.today.format("%a %b %d");
            let title = format!(" for today ({}) ", date);
            render_task_list(f, app, &app.today_view(), title, area);
        }
        ActiveView::All => {
            let (bar_area, list_area) = split_filter_bar(area);
            render_filter_bar(f, app, bar_area);
            let tasks = app.all_view();
            let title = format!(" all ({} of {}) ", tasks.len(), app.store.len());
            render_task_list(f, app, &tasks, title, list_area);
        }
    }
}

fn render_task_list(f: &mut Frame, app: &AppState, tasks: &[Task], title: String, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if tasks.is_empty() {
        let hint = match app.active_view {
            ActiveView::Today => "Nothing due today. Press 'a' to add a task.",
            ActiveView::All => "No tasks match.",
        };
        f.render_widget(Paragraph::new(hint).style(muted_style()).block(block), area);
        return;
    }

    let highlighted = app.highlighted_row();
    let dragged = app.drag.dragged_id();

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let style = if dragged == Some(task.id.as_str()) {
                dragging_style()
            } else if idx == highlighted && dragged.is_some() {
                drop_target_style()
            } else if idx == highlighted {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_task_line(task)).style(style)
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(highlighted));
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Create a single line for a task
/// Format: ◐ in progress  Write proposal  · due 12/06/2024
fn create_task_line(task: &Task) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("{:<14}", status_badge(task.status)), status_style(task.status)),
        Span::raw(" "),
        Span::raw(task.name.clone()),
    ];

    if !task.description.is_empty() {
        spans.push(Span::styled(format!("  {}", task.description), muted_style()));
    }

    spans.push(Span::styled(format!("  · due {}", format_deadline(task)), muted_style()));

    Line::from(spans)
}
