use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub tabs_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top bar: view tabs (1 row)
/// - Main area: List (65%) | Details (35%)
/// - Bottom: status line, then keybindings (1 row each)
pub fn create_layout(area: Rect) -> MainLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Keybindings bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // List pane
            Constraint::Percentage(35), // Details pane
        ])
        .split(vertical[1]);

    MainLayout {
        tabs_area: vertical[0],
        list_area: horizontal[0],
        details_area: horizontal[1],
        status_area: vertical[2],
        keybindings_area: vertical[3],
    }
}

/// Split the "all" pane into its filter bar and the list below it
pub fn split_filter_bar(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Create centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.list_area.height, 47);
        assert!(layout.list_area.width > layout.details_area.width);
    }

    #[test]
    fn test_split_filter_bar() {
        let (bar, list) = split_filter_bar(Rect::new(0, 0, 80, 20));
        assert_eq!(bar.height, 3);
        assert_eq!(list.height, 17);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 16);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 16);
    }
}
