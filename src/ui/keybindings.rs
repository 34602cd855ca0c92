use crate::app::AppState;
use crate::ui::styles::{error_style, hint_style, status_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ←/→ select   "),
        Span::raw("Space grab/drop   "),
        Span::raw("Enter edit   "),
        Span::raw("a add   "),
        Span::raw("d delete   "),
        Span::raw("C clear   "),
        Span::raw("s save   "),
        Span::raw("x export   "),
        Span::raw("u upload   "),
        Span::raw("g summary   "),
        Span::raw("G weekly   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the transient status line
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some(status) => {
            let style = if status.is_error {
                error_style()
            } else {
                status_style()
            };
            Line::from(Span::styled(format!(" {}", status.text), style))
        }
        None => Line::from(Span::styled(
            format!(" {} markers", app.timeline.marker_count()),
            hint_style(),
        )),
    };

    f.render_widget(Paragraph::new(line), area);
}
