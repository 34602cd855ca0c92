use crate::app::AppState;
use crate::domain::format_minutes;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the inline note editor for the selected marker
pub fn render_editor_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(editor) = &app.editor else {
        return;
    };
    let Some(marker) = app.timeline.marker(editor.marker_id) else {
        return;
    };

    let config = app.timeline.config();
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    // Buffer with a visible cursor between the split halves.
    let before: String = editor.buffer.chars().take(editor.cursor).collect();
    let after: String = editor.buffer.chars().skip(editor.cursor).collect();

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  > "),
            Span::raw(before),
            Span::styled("▏", modal_title_style()),
            Span::raw(after),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "  Markdown note; #tags feed the distribution",
            hint_style(),
        )),
    ];

    if let Some(gap) = app.timeline.gap_to_previous(marker.id) {
        lines.push(Line::from(Span::styled(
            format!("  {} since the previous marker", format_minutes(gap)),
            hint_style(),
        )));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", modal_title_style()),
        Span::raw(" Save  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Cancel  "),
    ]));

    let title = format!(" Note @ {} ", config.position_to_time(marker.position));
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
