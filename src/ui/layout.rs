use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub hints_area: Rect,
    pub timeline_area: Rect,
    pub segments_area: Rect,
    pub stats_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Timeline bar with ruler and pointer (fixed height)
/// - Main area: Blocks (60%) | Stats (40%)
/// - Bottom: status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(7), // Timeline pane
            Constraint::Min(0),    // Blocks + stats
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Blocks pane
            Constraint::Percentage(40), // Stats pane
        ])
        .split(main_chunks[2]);

    MainLayout {
        hints_area: main_chunks[0],
        timeline_area: main_chunks[1],
        segments_area: content_chunks[0],
        stats_area: content_chunks[1],
        status_area: main_chunks[3],
    }
}

/// Create centered modal area (confirmations, editor, prompts)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Larger centered area for the summary view
pub fn create_summary_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = create_layout(area);

        assert_eq!(layout.hints_area.height, 1);
        assert_eq!(layout.timeline_area.height, 7);
        assert!(layout.segments_area.height > 0);
        assert!(layout.stats_area.height > 0);
        assert_eq!(layout.status_area.height, 1);
        assert!(layout.segments_area.width > layout.stats_area.width);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 120, 40);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert!(modal.height < area.height);
        assert_eq!(modal.height, 10);
    }

    #[test]
    fn test_create_summary_area() {
        let area = Rect::new(0, 0, 120, 40);
        let summary = create_summary_area(area);

        assert_eq!(summary.height, 32);
        assert_eq!(summary.width, 96);
    }
}
