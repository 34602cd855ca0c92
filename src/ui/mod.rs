pub mod editor_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod segments_pane;
pub mod stats_pane;
pub mod styles;
pub mod timeline_pane;

use crate::app::{AppState, UiMode};
use editor_form::render_editor_form;
use keybindings::{render_keybindings, render_status};
use layout::create_layout;
use modal::{
    render_confirm_modal, render_day_changed_modal, render_password_prompt, render_summary_view,
};
use ratatui::Frame;
use segments_pane::render_segments_pane;
use stats_pane::render_stats_pane;
use timeline_pane::render_timeline_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.hints_area);
    render_timeline_pane(f, app, layout.timeline_area);
    render_segments_pane(f, app, layout.segments_area);
    render_stats_pane(f, app, layout.stats_area);
    render_status(f, app, layout.status_area);

    // Day changed modal takes precedence over everything else
    if app.ui_mode == UiMode::DayChanged {
        render_day_changed_modal(f, app, size);
        return;
    }

    match app.ui_mode {
        UiMode::EditingContent => render_editor_form(f, app, size),
        UiMode::ConfirmDelete | UiMode::ConfirmClear => render_confirm_modal(f, app, size),
        UiMode::PasswordPrompt => render_password_prompt(f, app, size),
        UiMode::SummaryView => render_summary_view(f, app, size),
        _ => {}
    }
}
