use crate::app::{AppState, RemoteAction, UiMode, DRAG_STEP, DRAG_STEP_FINE};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingContent => handle_editor_mode(app, key),
        UiMode::ConfirmDelete | UiMode::ConfirmClear => handle_confirm_mode(app, key),
        UiMode::PasswordPrompt => handle_prompt_mode(app, key),
        UiMode::SummaryView => handle_summary_mode(app, key),
        // DayChanged is handled by the main loop (quit only).
        UiMode::DayChanged => Ok(false),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Left/right: drag the grabbed marker, or walk the selection
        KeyCode::Left | KeyCode::Char('h') => {
            if app.is_dragging() {
                app.nudge_dragged(-drag_step(key));
            } else {
                app.select_prev();
            }
            Ok(false)
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.is_dragging() {
                app.nudge_dragged(drag_step(key));
            } else {
                app.select_next();
            }
            Ok(false)
        }

        // Grab/release the selected marker
        KeyCode::Char(' ') => {
            if app.is_dragging() {
                app.release_drag();
            } else {
                app.grab_selected();
            }
            Ok(false)
        }

        // Edit the selected marker's note
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit();
            Ok(false)
        }

        // Add a marker at the current time
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.place_marker_at_clock();
            Ok(false)
        }

        // Delete selected (with confirmation)
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.request_delete();
            Ok(false)
        }

        // Clear all markers (with confirmation)
        KeyCode::Char('C') => {
            app.request_clear();
            Ok(false)
        }

        // Save the day file now
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.save_now();
            app.set_status("Saved");
            Ok(false)
        }

        // Export the dated snapshot
        KeyCode::Char('x') | KeyCode::Char('X') => {
            app.export_snapshot();
            Ok(false)
        }

        // Remote: upload / daily summary / weekly report
        KeyCode::Char('u') | KeyCode::Char('U') => {
            app.start_remote_action(RemoteAction::Upload);
            Ok(false)
        }
        KeyCode::Char('g') => {
            app.start_remote_action(RemoteAction::DailySummary);
            Ok(false)
        }
        KeyCode::Char('G') => {
            app.start_remote_action(RemoteAction::WeeklyReport);
            Ok(false)
        }

        // Escape drops an active drag
        KeyCode::Esc => {
            if app.is_dragging() {
                app.release_drag();
            }
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Shift drags in fine steps
fn drag_step(key: KeyEvent) -> f64 {
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        DRAG_STEP_FINE
    } else {
        DRAG_STEP
    }
}

/// Handle keys in the content editor
fn handle_editor_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.commit_edit();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_edit();
            Ok(false)
        }
        KeyCode::Backspace => {
            if let Some(editor) = app.editor.as_mut() {
                editor.backspace();
            }
            Ok(false)
        }
        KeyCode::Left => {
            if let Some(editor) = app.editor.as_mut() {
                editor.move_left();
            }
            Ok(false)
        }
        KeyCode::Right => {
            if let Some(editor) = app.editor.as_mut() {
                editor.move_right();
            }
            Ok(false)
        }
        KeyCode::Home => {
            if let Some(editor) = app.editor.as_mut() {
                editor.move_home();
            }
            Ok(false)
        }
        KeyCode::End => {
            if let Some(editor) = app.editor.as_mut() {
                editor.move_end();
            }
            Ok(false)
        }
        // Plain characters (Ctrl combos pass through so Ctrl+C still works)
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.insert_char(c);
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the delete/clear confirmation modals
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            if app.ui_mode == UiMode::ConfirmDelete {
                app.confirm_delete();
            } else {
                app.confirm_clear();
            }
            Ok(false)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_modal();
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the password prompt
fn handle_prompt_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_prompt();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_prompt();
            Ok(false)
        }
        KeyCode::Backspace => {
            if let Some(prompt) = app.prompt.as_mut() {
                prompt.buffer.pop();
            }
            Ok(false)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(prompt) = app.prompt.as_mut() {
                prompt.buffer.push(c);
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the summary view
fn handle_summary_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => {
            app.summary_scroll = app.summary_scroll.saturating_sub(1);
            Ok(false)
        }
        KeyCode::Down => {
            app.summary_scroll += 1;
            Ok(false)
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            app.close_summary();
            Ok(false)
        }
        _ => Ok(false),
    }
}
