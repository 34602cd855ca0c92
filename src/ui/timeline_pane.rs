use crate::app::AppState;
use crate::domain::{MarkerKind, TimelineConfig};
use crate::ui::styles::{
    border_style, clock_pointer_style, confirmed_marker_style, default_style,
    dragging_marker_style, hint_style, ruler_style, selected_marker_style, temporary_marker_style,
    title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

/// Map a bar position (0..=100) onto a column of the rendered row
fn position_to_col(position: f64, width: u16) -> usize {
    let last = width.saturating_sub(1) as f64;
    (position / 100.0 * last).round() as usize
}

/// Hour labels row ("02  04  06 ...") aligned with the bar
fn tick_labels(config: &TimelineConfig, width: u16) -> String {
    let mut row = vec![' '; width as usize];
    let step = if width >= 96 { 2 } else { 4 };

    let mut offset = 0;
    while offset as f64 <= config.day_length_hours {
        let position = offset as f64 / config.day_length_hours * 100.0;
        let col = position_to_col(position, width);
        let hour = (config.day_start_hour.floor() as i64 + offset).rem_euclid(24);
        let label = format!("{:02}", hour);

        if col + label.len() <= row.len() {
            for (i, c) in label.chars().enumerate() {
                row[col + i] = c;
            }
        }
        offset += step;
    }

    row.into_iter().collect()
}

/// The pointer row: a "now" arrow above the bar, with its clock label
fn pointer_row(app: &AppState, width: u16) -> Line<'static> {
    let col = position_to_col(app.clock.position(), width);
    let label = Local::now().format("%H:%M").to_string();

    let mut spans = Vec::new();
    // Label sits to whichever side of the arrow has room.
    if col + 2 + label.len() <= width as usize {
        spans.push(Span::raw(" ".repeat(col)));
        spans.push(Span::styled("▼", clock_pointer_style()));
        spans.push(Span::styled(format!(" {}", label), clock_pointer_style()));
    } else if col >= label.len() + 1 {
        spans.push(Span::raw(" ".repeat(col - label.len() - 1)));
        spans.push(Span::styled(format!("{} ", label), clock_pointer_style()));
        spans.push(Span::styled("▼", clock_pointer_style()));
    } else {
        spans.push(Span::raw(" ".repeat(col)));
        spans.push(Span::styled("▼", clock_pointer_style()));
    }
    Line::from(spans)
}

/// The bar itself: a baseline with one glyph per marker
fn bar_row(app: &AppState, width: u16) -> Line<'static> {
    // Later markers paint over earlier ones at the same column; the
    // selected/dragged marker paints last so it always stays visible.
    let mut cells: BTreeMap<usize, (char, ratatui::style::Style)> = BTreeMap::new();

    for marker in app.timeline.sorted_markers() {
        let col = position_to_col(marker.position, width);
        let style = match marker.kind() {
            MarkerKind::Confirmed => confirmed_marker_style(),
            MarkerKind::Temporary => temporary_marker_style(),
        };
        cells.insert(col, ('│', style));
    }

    if let Some(selected) = app.selected_marker() {
        let col = position_to_col(selected.position, width);
        let style = if app.dragging == Some(selected.id) {
            dragging_marker_style()
        } else {
            selected_marker_style()
        };
        cells.insert(col, ('┃', style));
    }

    let mut spans = Vec::with_capacity(width as usize);
    for col in 0..width as usize {
        match cells.get(&col) {
            Some((c, style)) => spans.push(Span::styled(c.to_string(), *style)),
            None => spans.push(Span::styled("─", ruler_style())),
        }
    }
    Line::from(spans)
}

/// One-line summary of the selected marker under the bar
fn info_row(app: &AppState) -> Line<'static> {
    let config = app.timeline.config();

    match app.selected_marker() {
        Some(marker) => {
            let mut spans = vec![
                Span::styled(
                    format!("▶ {} ", config.position_to_time(marker.position)),
                    title_style(),
                ),
                Span::styled(
                    if marker.kind() == MarkerKind::Temporary {
                        "(unlabeled)".to_string()
                    } else {
                        marker.summary()
                    },
                    default_style(),
                ),
            ];
            if let Some(gap) = app.timeline.gap_to_previous(marker.id) {
                spans.push(Span::styled(
                    format!("  · {} since previous", crate::domain::format_minutes(gap)),
                    hint_style(),
                ));
            }
            if app.dragging == Some(marker.id) {
                spans.push(Span::styled(
                    "  [dragging: ←/→ move, Space drop]",
                    dragging_marker_style(),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "No markers yet: press 'a' to drop one at the current time",
            hint_style(),
        )),
    }
}

/// Render the timeline pane
pub fn render_timeline_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let config = app.timeline.config();
    let date = Local::now().format("%a %b %d");
    let title = format!(
        " Timeline ({}) · {} + {}h ",
        date,
        config.position_to_time(0.0),
        config.day_length_hours
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines = vec![
        Line::from(Span::styled(
            tick_labels(config, inner.width),
            ruler_style(),
        )),
        pointer_row(app, inner.width),
        bar_row(app, inner.width),
        info_row(app),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_col_spans_the_width() {
        assert_eq!(position_to_col(0.0, 101), 0);
        assert_eq!(position_to_col(100.0, 101), 100);
        assert_eq!(position_to_col(50.0, 101), 50);
    }

    #[test]
    fn test_tick_labels_start_at_day_start() {
        let config = TimelineConfig::default();
        let row = tick_labels(&config, 100);
        assert!(row.starts_with("02"));
    }

    #[test]
    fn test_tick_labels_fit_narrow_widths() {
        let config = TimelineConfig::default();
        let row = tick_labels(&config, 20);
        assert_eq!(row.chars().count(), 20);
    }
}
