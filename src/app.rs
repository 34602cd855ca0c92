use crate::clock::ClockPointer;
use crate::domain::{Marker, MarkerId, Timeline};
use crate::persistence::{
    save_markers, snapshot_file_name, spawn_daily_summary, spawn_save, spawn_weekly_report,
    write_snapshot, MarkerRecord, RemoteClient, RemoteEvent, SummarySection,
};
use crate::ticker::Debouncer;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

/// How long a status message stays on screen
const STATUS_SECS: u64 = 4;

/// Step sizes for keyboard dragging, in bar percent
pub const DRAG_STEP: f64 = 0.5;
pub const DRAG_STEP_FINE: f64 = 0.1;

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingContent,
    ConfirmDelete,
    ConfirmClear,
    PasswordPrompt,
    SummaryView,
    DayChanged, // Shown when midnight has passed, forces restart
}

/// What a submitted password prompt should kick off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    Upload,
    DailySummary,
    WeeklyReport,
}

/// Inline editor state for the selected marker's content
#[derive(Debug, Clone)]
pub struct EditorState {
    pub marker_id: MarkerId,
    pub buffer: String,
    /// Cursor as a char index (not bytes; content is routinely CJK).
    pub cursor: usize,
}

impl EditorState {
    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.buffer.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }
}

/// Password prompt state
#[derive(Debug, Clone)]
pub struct PromptState {
    pub action: RemoteAction,
    pub buffer: String,
}

/// Transient status line, the toast equivalent
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    expires_at: Instant,
}

/// Main application state
///
/// Owns the timeline engine and every piece of UI state; nothing is ever
/// read back from rendered output. Each user action is one method here, so
/// tests drive the app by calling actions and asserting on state.
pub struct AppState {
    pub timeline: Timeline,
    pub selected: Option<MarkerId>,
    /// The singleton drag reference: at most one marker moves at a time,
    /// cleared on release.
    pub dragging: Option<MarkerId>,
    pub ui_mode: UiMode,
    pub editor: Option<EditorState>,
    pub prompt: Option<PromptState>,
    pub summary: Option<(String, Vec<SummarySection>)>,
    pub summary_scroll: usize,
    pub status: Option<StatusMessage>,
    pub clock: ClockPointer,
    pub save_debounce: Debouncer,
    pub file_date: chrono::NaiveDate, // Track which day's file we're using
    pub data_path: PathBuf,
    remote: Option<RemoteClient>,
    pub last_password: String,
    events_tx: Sender<RemoteEvent>,
    events_rx: Receiver<RemoteEvent>,
}

impl AppState {
    pub fn new(
        timeline: Timeline,
        data_path: PathBuf,
        remote: Option<RemoteClient>,
        password: Option<String>,
    ) -> Self {
        let clock = ClockPointer::new(timeline.config());
        let selected = timeline.sorted_markers().first().map(|m| m.id);
        let (events_tx, events_rx) = channel();

        Self {
            timeline,
            selected,
            dragging: None,
            ui_mode: UiMode::Normal,
            editor: None,
            prompt: None,
            summary: None,
            summary_scroll: 0,
            status: None,
            clock,
            save_debounce: Debouncer::default(),
            file_date: chrono::Local::now().date_naive(),
            data_path,
            remote,
            last_password: password.unwrap_or_default(),
            events_tx,
            events_rx,
        }
    }

    /// Check if the current date has changed (crossed midnight)
    pub fn has_day_changed(&self) -> bool {
        let current_date = chrono::Local::now().date_naive();
        current_date != self.file_date
    }

    pub fn selected_marker(&self) -> Option<&Marker> {
        self.selected.and_then(|id| self.timeline.marker(id))
    }

    /// Persisted view of the current markers
    pub fn records(&self) -> Vec<MarkerRecord> {
        MarkerRecord::from_markers(self.timeline.markers())
    }

    // --- status line ---------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            expires_at: Instant::now() + Duration::from_secs(STATUS_SECS),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
            expires_at: Instant::now() + Duration::from_secs(STATUS_SECS),
        });
    }

    // --- selection -----------------------------------------------------

    pub fn select_next(&mut self) {
        match self.selected {
            Some(id) => {
                if let Some(next) = self.timeline.neighbor(id, 1) {
                    self.selected = Some(next);
                }
            }
            None => self.selected = self.timeline.sorted_markers().first().map(|m| m.id),
        }
    }

    pub fn select_prev(&mut self) {
        match self.selected {
            Some(id) => {
                if let Some(prev) = self.timeline.neighbor(id, -1) {
                    self.selected = Some(prev);
                }
            }
            None => self.selected = self.timeline.sorted_markers().last().map(|m| m.id),
        }
    }

    // --- marker mutations ----------------------------------------------

    /// Place a new (temporary) marker and select it.
    pub fn place_marker_at(&mut self, position: f64) {
        match self.timeline.insert_marker(position, None) {
            Ok(id) => {
                self.selected = Some(id);
                self.checkpoint();
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Place a marker where the clock pointer currently sits.
    pub fn place_marker_at_clock(&mut self) {
        self.clock.refresh(self.timeline.config());
        self.place_marker_at(self.clock.position());
    }

    /// Start dragging the selected marker. Only one drag can be active.
    pub fn grab_selected(&mut self) {
        if self.dragging.is_none() {
            self.dragging = self.selected;
        }
    }

    /// Finish the drag and flush the debounced checkpoint immediately.
    pub fn release_drag(&mut self) {
        if self.dragging.take().is_some() {
            self.save_debounce.cancel();
            self.save_now();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Move the dragged marker by a step (clamping happens in the store).
    pub fn nudge_dragged(&mut self, delta: f64) {
        let Some(id) = self.dragging else {
            return;
        };
        let Some(position) = self.timeline.marker(id).map(|m| m.position) else {
            return;
        };
        match self.timeline.move_marker(id, position + delta) {
            Ok(()) => self.checkpoint(),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    // --- content editor ------------------------------------------------

    pub fn start_edit(&mut self) {
        // The placeholder opens as an empty buffer, like a fresh note.
        let (marker_id, buffer) = match self.selected_marker() {
            Some(marker) if marker.kind() == crate::domain::MarkerKind::Temporary => {
                (marker.id, String::new())
            }
            Some(marker) => (marker.id, marker.content.clone()),
            None => return,
        };
        let cursor = buffer.chars().count();
        self.editor = Some(EditorState {
            marker_id,
            buffer,
            cursor,
        });
        self.ui_mode = UiMode::EditingContent;
    }

    pub fn commit_edit(&mut self) {
        if let Some(editor) = self.editor.take() {
            match self.timeline.set_content(editor.marker_id, &editor.buffer) {
                Ok(()) => self.checkpoint(),
                Err(e) => self.set_error(e.to_string()),
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- deletion ------------------------------------------------------

    pub fn request_delete(&mut self) {
        if self.selected.is_some() {
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.selected {
            // Keep a sensible selection after the removal.
            let next = self
                .timeline
                .neighbor(id, 1)
                .or_else(|| self.timeline.neighbor(id, -1));
            match self.timeline.remove_marker(id) {
                Ok(_) => {
                    self.selected = next;
                    self.checkpoint();
                }
                Err(e) => self.set_error(e.to_string()),
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn request_clear(&mut self) {
        if !self.timeline.is_empty() {
            self.ui_mode = UiMode::ConfirmClear;
        }
    }

    pub fn confirm_clear(&mut self) {
        self.timeline.clear();
        self.selected = None;
        self.dragging = None;
        self.checkpoint();
        self.ui_mode = UiMode::Normal;
        self.set_status("Cleared all markers");
    }

    pub fn cancel_modal(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    // --- persistence ---------------------------------------------------

    /// Checkpoint after a mutation. While a drag is active the write is
    /// debounced to coalesce the move burst; everything else writes through
    /// before the action returns.
    fn checkpoint(&mut self) {
        if self.dragging.is_some() {
            self.save_debounce.schedule();
        } else {
            self.save_now();
        }
    }

    /// Write the day file. A failure becomes a status message; the timeline
    /// stays editable regardless.
    pub fn save_now(&mut self) {
        if let Err(e) = save_markers(&self.data_path, &self.records()) {
            self.set_error(format!("Save failed: {}", e));
        }
    }

    /// Write the dated snapshot artifact into the current directory.
    pub fn export_snapshot(&mut self) {
        let name = snapshot_file_name(chrono::Local::now().date_naive());
        match write_snapshot(PathBuf::from(&name), &self.records()) {
            Ok(()) => self.set_status(format!("Exported {}", name)),
            Err(e) => self.set_error(format!("Export failed: {}", e)),
        }
    }

    // --- remote --------------------------------------------------------

    /// Open the password prompt for a remote action.
    pub fn start_remote_action(&mut self, action: RemoteAction) {
        if self.remote.is_none() {
            self.set_error("No server configured (start with --server URL)");
            return;
        }
        self.prompt = Some(PromptState {
            action,
            buffer: self.last_password.clone(),
        });
        self.ui_mode = UiMode::PasswordPrompt;
    }

    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            self.ui_mode = UiMode::Normal;
            return;
        };
        self.ui_mode = UiMode::Normal;
        self.last_password = prompt.buffer.clone();

        let Some(client) = self.remote.clone() else {
            return;
        };
        match prompt.action {
            RemoteAction::Upload => {
                spawn_save(
                    client,
                    prompt.buffer,
                    self.records(),
                    self.events_tx.clone(),
                );
                self.set_status("Uploading to server…");
            }
            RemoteAction::DailySummary => {
                spawn_daily_summary(
                    client,
                    prompt.buffer,
                    self.records(),
                    self.events_tx.clone(),
                );
                self.set_status("Requesting daily summary…");
            }
            RemoteAction::WeeklyReport => {
                spawn_weekly_report(client, prompt.buffer, self.events_tx.clone());
                self.set_status("Requesting weekly report…");
            }
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.ui_mode = UiMode::Normal;
    }

    fn show_summary(&mut self, title: &str, sections: Vec<SummarySection>) {
        self.summary = Some((title.to_string(), sections));
        self.summary_scroll = 0;
        self.ui_mode = UiMode::SummaryView;
    }

    pub fn close_summary(&mut self) {
        self.summary = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Drain finished remote calls. Remote failures only ever become status
    /// messages; they never touch the timeline.
    fn poll_remote_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                RemoteEvent::SaveFinished(Ok(filepath)) => {
                    self.set_status(format!("Saved to server: {}", filepath));
                }
                RemoteEvent::SaveFinished(Err(e)) => {
                    self.set_error(format!("Server save failed: {}", e));
                }
                RemoteEvent::SummaryFinished(Ok(sections)) => {
                    self.show_summary("Daily Summary", sections);
                }
                RemoteEvent::SummaryFinished(Err(e)) => {
                    self.set_error(format!("Summary failed: {}", e));
                }
                RemoteEvent::WeeklyFinished(Ok(sections)) => {
                    self.show_summary("Weekly Report", sections);
                }
                RemoteEvent::WeeklyFinished(Err(e)) => {
                    self.set_error(format!("Weekly report failed: {}", e));
                }
            }
        }
    }

    // --- tick ----------------------------------------------------------

    /// Periodic housekeeping, called once per event-loop tick.
    pub fn tick(&mut self) {
        let config = *self.timeline.config();
        self.clock.tick(&config);

        if self.save_debounce.fire_due(Instant::now()) {
            self.save_now();
        }

        if let Some(status) = &self.status {
            if Instant::now() >= status.expires_at {
                self.status = None;
            }
        }

        self.poll_remote_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarkerKind, TimelineConfig};
    use tempfile::tempdir;

    fn test_app() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("markers.json");
        let app = AppState::new(
            Timeline::new(TimelineConfig::default()),
            path,
            None,
            None,
        );
        (app, dir)
    }

    #[test]
    fn test_place_marker_selects_and_saves() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(30.0);

        assert_eq!(app.timeline.marker_count(), 1);
        let marker = app.selected_marker().unwrap();
        assert_eq!(marker.position, 30.0);
        assert_eq!(marker.kind(), MarkerKind::Temporary);

        // Checkpoint wrote through synchronously.
        let saved = crate::persistence::load_markers(&app.data_path).unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_drag_is_a_singleton() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(20.0);
        let first = app.selected;

        app.grab_selected();
        assert_eq!(app.dragging, first);

        // Selecting another marker and grabbing again must not steal the drag.
        app.place_marker_at(80.0);
        app.grab_selected();
        assert_eq!(app.dragging, first);

        app.release_drag();
        assert!(!app.is_dragging());
    }

    #[test]
    fn test_nudge_moves_and_clamps() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(99.8);
        app.grab_selected();

        app.nudge_dragged(DRAG_STEP);
        assert_eq!(app.selected_marker().unwrap().position, 100.0);

        app.nudge_dragged(-DRAG_STEP_FINE);
        assert!((app.selected_marker().unwrap().position - 99.9).abs() < 1e-9);
    }

    #[test]
    fn test_drag_checkpoint_is_debounced_until_release() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(10.0);
        let on_disk = |app: &AppState| {
            crate::persistence::load_markers(&app.data_path).unwrap()[0].position
        };
        assert_eq!(on_disk(&app), 10.0);

        app.grab_selected();
        app.nudge_dragged(DRAG_STEP);
        // Still within the debounce window: the file lags behind.
        assert_eq!(on_disk(&app), 10.0);
        assert!(app.save_debounce.is_pending());

        app.release_drag();
        assert_eq!(on_disk(&app), 10.5);
        assert!(!app.save_debounce.is_pending());
    }

    #[test]
    fn test_edit_commit_updates_content_and_kind() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(40.0);

        app.start_edit();
        assert_eq!(app.ui_mode, UiMode::EditingContent);
        // Placeholder opens empty.
        assert_eq!(app.editor.as_ref().unwrap().buffer, "");

        for c in "写代码 #work".chars() {
            app.editor.as_mut().unwrap().insert_char(c);
        }
        app.commit_edit();

        let marker = app.selected_marker().unwrap();
        assert_eq!(marker.content, "写代码 #work");
        assert_eq!(marker.kind(), MarkerKind::Confirmed);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_editor_cursor_handles_multibyte() {
        let mut editor = EditorState {
            marker_id: uuid::Uuid::new_v4(),
            buffer: "写代码".to_string(),
            cursor: 3,
        };
        editor.backspace();
        assert_eq!(editor.buffer, "写代");

        editor.move_home();
        editor.insert_char('去');
        assert_eq!(editor.buffer, "去写代");
    }

    #[test]
    fn test_confirm_delete_moves_selection() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(20.0);
        let first = app.selected.unwrap();
        app.place_marker_at(60.0);

        app.selected = Some(first);
        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);

        app.confirm_delete();
        assert_eq!(app.timeline.marker_count(), 1);
        assert_eq!(app.selected_marker().unwrap().position, 60.0);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_clear_all() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(20.0);
        app.place_marker_at(60.0);

        app.request_clear();
        app.confirm_clear();
        assert!(app.timeline.is_empty());
        assert!(app.selected.is_none());

        let saved = crate::persistence::load_markers(&app.data_path).unwrap();
        assert!(saved.is_empty());
    }

    #[test]
    fn test_selection_moves_in_sorted_order() {
        let (mut app, _dir) = test_app();
        app.place_marker_at(70.0);
        app.place_marker_at(10.0);
        app.place_marker_at(40.0);

        // Walk from the start: 10 -> 40 -> 70.
        app.selected = None;
        app.select_next();
        assert_eq!(app.selected_marker().unwrap().position, 10.0);
        app.select_next();
        assert_eq!(app.selected_marker().unwrap().position, 40.0);
        app.select_next();
        assert_eq!(app.selected_marker().unwrap().position, 70.0);
        // Past the end stays put.
        app.select_next();
        assert_eq!(app.selected_marker().unwrap().position, 70.0);
    }

    #[test]
    fn test_remote_action_without_server_is_an_error() {
        let (mut app, _dir) = test_app();
        app.start_remote_action(RemoteAction::Upload);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.status.as_ref().unwrap().is_error);
    }
}
