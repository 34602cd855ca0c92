use crate::app::AppState;
use crate::domain::{classify, content_summary, format_minutes, is_placeholder};
use crate::ui::styles::{
    border_style, category_style, default_style, hint_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the derived blocks pane
pub fn render_segments_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let config = app.timeline.config();
    let sorted = app.timeline.sorted_markers();

    let items: Vec<ListItem> = app
        .timeline
        .segments()
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            let label = if is_placeholder(&segment.content) {
                "(unlabeled)".to_string()
            } else {
                content_summary(&segment.content)
            };

            let mut spans = vec![
                Span::styled(
                    format!(
                        "{} – {} ",
                        config.position_to_time(segment.start_position),
                        config.position_to_time(segment.end_position)
                    ),
                    default_style(),
                ),
                Span::styled(format!("{:>7}  ", format_minutes(segment.minutes)), hint_style()),
                Span::raw(label),
            ];
            if let Some(category) = classify(&segment.content) {
                spans.push(Span::styled(
                    format!("  [{}]", category.name()),
                    category_style(),
                ));
            }

            // Highlight the block owned by the selected (left-bounding) marker.
            let owned_by_selected = sorted
                .get(idx)
                .map(|m| Some(m.id) == app.selected)
                .unwrap_or(false);
            let style = if owned_by_selected {
                selected_style()
            } else {
                default_style()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let title = format!(" Blocks ({}) ", app.timeline.segments().len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
