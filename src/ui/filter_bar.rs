use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{border_style, hint_style, modal_title_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Search box plus the current status filter, sort key and today toggle
pub fn render_filter_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let searching = app.ui_mode == UiMode::Searching;
    let params = &app.all_params;

    let mut spans = vec![Span::styled("search: ", title_style())];
    if params.search.is_empty() && !searching {
        spans.push(Span::styled("(press /)", hint_style()));
    } else {
        spans.push(Span::raw(params.search.clone()));
    }
    if searching {
        spans.push(Span::styled("█", modal_title_style()));
    }

    spans.push(Span::raw("   "));
    spans.push(Span::styled("status: ", title_style()));
    spans.push(Span::raw(params.status.label()));
    spans.push(Span::raw("   "));
    spans.push(Span::styled("sort: ", title_style()));
    spans.push(Span::raw(app.sort.label()));
    spans.push(Span::raw("   "));
    spans.push(Span::styled("today only: ", title_style()));
    spans.push(Span::raw(if params.today_only { "on" } else { "off" }));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    f.render_widget(paragraph, area);
}
