use crate::app::AppState;
use crate::domain::format_minutes;
use crate::ui::styles::{
    border_style, category_style, gauge_style, hint_style, tag_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BAR_WIDTH: usize = 12;

/// Textual distribution bar, proportional to share
fn distribution_bar(share: f64) -> String {
    let filled = (share * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render category totals and tag distribution
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    let categories = app.timeline.category_totals();
    let category_total: f64 = categories.values().sum();

    lines.push(Line::from(Span::styled("Category Totals", title_style())));
    if categories.is_empty() {
        lines.push(Line::from(Span::styled(
            "  nothing labeled yet",
            hint_style(),
        )));
    }
    for (category, minutes) in categories {
        let share = if category_total > 0.0 {
            minutes / category_total
        } else {
            0.0
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", category.name()), category_style()),
            Span::styled(distribution_bar(share), gauge_style()),
            Span::raw(format!(" {:>7}", format_minutes(*minutes))),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Tag Distribution", title_style())));

    let tags = app.timeline.tag_totals();
    let tag_total: f64 = tags.values().sum();
    if tags.is_empty() {
        lines.push(Line::from(Span::styled(
            "  no #tags in today's notes",
            hint_style(),
        )));
    }

    // Largest buckets first.
    let mut entries: Vec<_> = tags.iter().collect();
    entries.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (tag, minutes) in entries {
        let share = if tag_total > 0.0 {
            minutes / tag_total
        } else {
            0.0
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  #{:<11}", tag), tag_style()),
            Span::styled(distribution_bar(share), gauge_style()),
            Span::raw(format!(" {:>7}", format_minutes(*minutes))),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Stats ", title_style())),
    );

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_bar_bounds() {
        assert_eq!(distribution_bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(distribution_bar(1.0), "█".repeat(BAR_WIDTH));
        // Over-full shares stay within the bar.
        assert_eq!(distribution_bar(1.5), "█".repeat(BAR_WIDTH));
    }

    #[test]
    fn test_distribution_bar_half() {
        let bar = distribution_bar(0.5);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), BAR_WIDTH / 2);
    }
}
