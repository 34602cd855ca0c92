use crate::app::{AppState, RemoteAction, UiMode};
use crate::ui::{
    layout::{create_modal_area, create_summary_area},
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the day changed modal (forces restart)
pub fn render_day_changed_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode == UiMode::DayChanged {
        let modal_area = create_modal_area(area);
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw("  A new day has begun!"),
            Line::raw(""),
            Line::raw("  The date has changed since you started the app,"),
            Line::raw("  and the timeline tracks one day per file."),
            Line::raw("  Please close and restart timebar to continue."),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [q]", modal_title_style()),
                Span::raw(" Close timebar  "),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Day Changed ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the delete/clear confirmation modal
pub fn render_confirm_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, message) = match app.ui_mode {
        UiMode::ConfirmDelete => {
            let detail = app
                .selected_marker()
                .map(|m| {
                    format!(
                        "the marker at {}",
                        app.timeline.config().position_to_time(m.position)
                    )
                })
                .unwrap_or_else(|| "this marker".to_string());
            (" Delete Marker ", format!("  Delete {}?", detail))
        }
        UiMode::ConfirmClear => (
            " Clear All ",
            format!(
                "  Remove all {} markers from the timeline?",
                app.timeline.marker_count()
            ),
        ),
        _ => return,
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(message),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Yes  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" No  "),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the server password prompt (input is masked)
pub fn render_password_prompt(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };

    let action = match prompt.action {
        RemoteAction::Upload => "upload today's markers",
        RemoteAction::DailySummary => "request a daily summary",
        RemoteAction::WeeklyReport => "request a weekly report",
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let masked = "*".repeat(prompt.buffer.chars().count());
    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Server password to {}:", action)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(masked, modal_title_style()),
            Span::styled("▏", modal_title_style()),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" Send  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" Cancel  "),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Server ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the scrollable server summary/report view
pub fn render_summary_view(f: &mut Frame, app: &AppState, area: Rect) {
    let Some((title, sections)) = &app.summary else {
        return;
    };

    let summary_area = create_summary_area(area);
    f.render_widget(Clear, summary_area);

    let mut lines = vec![Line::raw("")];
    if sections.is_empty() {
        lines.push(Line::raw("  (the server sent an empty report)"));
    }
    for section in sections {
        lines.push(Line::from(Span::styled(
            format!("  {}", section.title),
            modal_title_style(),
        )));
        for text_line in section.content.lines() {
            lines.push(Line::raw(format!("  {}", text_line)));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(vec![
        Span::styled("  [↑/↓]", modal_title_style()),
        Span::raw(" Scroll  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Close  "),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", title), modal_title_style()))
                .style(modal_bg_style()),
        )
        .scroll((app.summary_scroll as u16, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, summary_area);
}
