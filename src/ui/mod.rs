pub mod details_pane;
pub mod filter_bar;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::ActiveView;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::{render_keybindings, render_status_line};
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_delete_modal, render_import_modal};
use ratatui::{widgets::Tabs, Frame};
use styles::{hint_style, selected_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    let selected_tab = match app.active_view {
        ActiveView::Today => 0,
        ActiveView::All => 1,
    };
    let tabs = Tabs::new(vec![" today ", " all time "])
        .select(selected_tab)
        .style(hint_style())
        .highlight_style(selected_style());
    f.render_widget(tabs, layout.tabs_area);

    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_status_line(f, app, layout.status_area);
    render_keybindings(f, app, layout.keybindings_area);

    // Overlays
    render_confirm_delete_modal(f, app, size);
    render_import_modal(f, app, size);
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
