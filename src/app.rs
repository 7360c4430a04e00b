//! Application state and navigation logic.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sim::assistant::{Attachment, CANNED_RESPONSES};
use crate::sim::vitals::MONITORED_PATIENTS;
use crate::sim::ward::sort_beds_by;
use crate::sim::{BedSortColumn, Patient, Responder, StatusFilter, Transcript, VitalsBoard, Ward};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Bed detail is shown as an overlay (controlled by `App::show_bed_detail`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Vital-sign cards, trend charts and the patient strip.
    Vitals,
    /// Ward occupancy with filtering, search and sorting.
    Beds,
    /// Mock assistant console.
    Assistant,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Vitals => View::Beds,
            View::Beds => View::Assistant,
            View::Assistant => View::Vitals,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Vitals => View::Assistant,
            View::Beds => View::Vitals,
            View::Assistant => View::Beds,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Vitals => "Vitals",
            View::Beds => "Beds",
            View::Assistant => "Assistant",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_bed_detail: bool,

    // Simulation state
    pub board: VitalsBoard,
    pub ward: Ward,
    pub chat: Transcript,
    pub responder: Responder,
    rng: StdRng,

    /// When the chart window last rolled, for the status bar.
    pub chart_updated: Instant,

    // Vitals view
    pub selected_patient_index: usize,

    // Beds view
    pub selected_bed_index: usize,
    pub filter_text: String,
    pub filter_active: bool,
    pub status_filter: StatusFilter,
    pub sort_column: BedSortColumn,
    pub sort_ascending: bool,

    // Assistant view
    /// Path being typed into the attach prompt; `None` when inactive.
    pub attach_prompt: Option<String>,
    /// Lines scrolled up from the bottom of the transcript.
    pub transcript_scroll: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App, generating the initial simulation state.
    ///
    /// With `seed` set the whole session is deterministic.
    pub fn new(seed: Option<u64>, responder: Responder, theme: Theme) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now = Local::now();
        let board = VitalsBoard::new(&mut rng, now);
        let ward = Ward::generate(&mut rng, now);
        tracing::info!(seeded = seed.is_some(), beds = ward.beds.len(), "session started");

        Self {
            running: true,
            current_view: View::Vitals,
            show_help: false,
            show_bed_detail: false,
            board,
            ward,
            chat: Transcript::new(now),
            responder,
            rng,
            chart_updated: Instant::now(),
            selected_patient_index: 0,
            selected_bed_index: 0,
            filter_text: String::new(),
            filter_active: false,
            status_filter: StatusFilter::All,
            sort_column: BedSortColumn::default(),
            sort_ascending: true,
            attach_prompt: None,
            transcript_scroll: 0,
            theme,
            status_message: None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    // ---- timers ----

    /// Fast timer: advance the reading cards by one walk step.
    pub fn tick_cards(&mut self) {
        self.board.tick_cards(&mut self.rng);
    }

    /// Slow timer: roll the chart window.
    pub fn tick_chart(&mut self) {
        self.board.tick_chart(&mut self.rng, Local::now());
        self.chart_updated = Instant::now();
    }

    /// Throw away the current simulation and generate a fresh one.
    pub fn regenerate(&mut self) {
        let now = Local::now();
        self.board = VitalsBoard::new(&mut self.rng, now);
        self.ward = Ward::generate(&mut self.rng, now);
        self.chart_updated = Instant::now();
        self.selected_bed_index = 0;
        self.show_bed_detail = false;
        self.set_status_message("Simulation regenerated".to_string());
    }

    // ---- navigation ----

    /// Switch to the next view (cycles Vitals → Beds → Assistant).
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.show_bed_detail = false;
        self.transcript_scroll = 0;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Vitals => {
                let max = MONITORED_PATIENTS.len().saturating_sub(1);
                self.selected_patient_index = (self.selected_patient_index + n).min(max);
            }
            View::Beds => {
                let max = self.filtered_bed_count().saturating_sub(1);
                self.selected_bed_index = (self.selected_bed_index + n).min(max);
            }
            View::Assistant => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(n);
            }
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Vitals => {
                self.selected_patient_index = self.selected_patient_index.saturating_sub(n);
            }
            View::Beds => {
                self.selected_bed_index = self.selected_bed_index.saturating_sub(n);
            }
            View::Assistant => {
                self.transcript_scroll += n;
            }
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Vitals => self.selected_patient_index = 0,
            View::Beds => self.selected_bed_index = 0,
            View::Assistant => self.transcript_scroll = usize::MAX / 2,
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Vitals => {
                self.selected_patient_index = MONITORED_PATIENTS.len().saturating_sub(1);
            }
            View::Beds => {
                self.selected_bed_index = self.filtered_bed_count().saturating_sub(1);
            }
            View::Assistant => self.transcript_scroll = 0,
        }
    }

    /// Open the bed detail overlay for the current selection.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Beds && self.filtered_bed_count() > 0 {
            self.show_bed_detail = true;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_bed_detail = false;
    }

    /// Navigate back: close overlay first, then return to the Vitals view.
    pub fn go_back(&mut self) {
        if self.show_bed_detail {
            self.show_bed_detail = false;
            return;
        }
        if self.current_view != View::Vitals {
            self.set_view(View::Vitals);
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    // ---- beds view queries ----

    /// Beds visible under the current filter, search and sort.
    pub fn visible_beds(&self) -> Vec<&Patient> {
        let mut beds = self.ward.filtered(self.status_filter, &self.filter_text);
        sort_beds_by(&mut beds, self.sort_column, self.sort_ascending);
        beds
    }

    /// Count of beds visible under the current filter and search.
    pub fn filtered_bed_count(&self) -> usize {
        self.ward.filtered(self.status_filter, &self.filter_text).len()
    }

    /// The bed behind the current visual selection, if any.
    pub fn selected_bed(&self) -> Option<&Patient> {
        let beds = self.visible_beds();
        if beds.is_empty() {
            return None;
        }
        beds.get(self.selected_bed_index.min(beds.len() - 1)).copied()
    }

    /// Cycle the sort column for the bed table.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Cycle the status filter and re-clamp the selection.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.selected_bed_index =
            self.selected_bed_index.min(self.filtered_bed_count().saturating_sub(1));
    }

    // ---- search filter input ----

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    // ---- assistant ----

    /// Submit the input line; schedules one canned reply per accepted send.
    ///
    /// An empty line with no staged attachments is a no-op.
    pub fn send_chat(&mut self) {
        if !self.chat.submit(Local::now()) {
            return;
        }
        let reply = CANNED_RESPONSES[self.rng.gen_range(0..CANNED_RESPONSES.len())].to_string();
        self.responder.dispatch(reply);
        self.transcript_scroll = 0;
    }

    /// Drain due replies into the transcript. Called every loop iteration.
    pub fn poll_replies(&mut self) {
        while let Some(reply) = self.responder.poll() {
            self.chat.receive(reply, Local::now());
            self.transcript_scroll = 0;
        }
    }

    /// Open the attach-path prompt.
    pub fn start_attach(&mut self) {
        self.attach_prompt = Some(String::new());
    }

    /// Cancel the attach-path prompt.
    pub fn cancel_attach(&mut self) {
        self.attach_prompt = None;
    }

    /// Stat the typed path and stage its metadata as an attachment.
    pub fn confirm_attach(&mut self) {
        let Some(path) = self.attach_prompt.take() else {
            return;
        };
        let path = path.trim();
        if path.is_empty() {
            return;
        }

        match Attachment::from_path(Path::new(path)) {
            Ok(attachment) => {
                let notice = if attachment.is_recognized() {
                    format!("Attached {} ({})", attachment.name, attachment.size)
                } else {
                    format!("Attached {} (type not on the accept list)", attachment.name)
                };
                self.chat.staged.push(attachment);
                self.set_status_message(notice);
            }
            Err(e) => self.set_status_message(format!("Attach failed: {}", e)),
        }
    }

    // ---- export ----

    /// Export the current simulation state to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let export = serde_json::json!({
            "exported_at": Local::now().to_rfc3339(),
            "ward": {
                "stats": self.ward.stats(),
                "beds": self.ward.beds,
            },
            "vitals": {
                "readings": self.board.readings,
                "chart": self.board.chart,
            },
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vitals::{CHART_WINDOW, TREND_WINDOW};
    use std::time::Duration;

    fn test_app() -> (tokio::runtime::Runtime, App) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let responder = Responder::new(rt.handle().clone(), Duration::from_millis(10));
        let app = App::new(Some(42), responder, Theme::dark());
        (rt, app)
    }

    #[test]
    fn test_view_cycle_wraps_both_ways() {
        let (_rt, mut app) = test_app();
        assert_eq!(app.current_view, View::Vitals);
        app.next_view();
        app.next_view();
        app.next_view();
        assert_eq!(app.current_view, View::Vitals);
        app.prev_view();
        assert_eq!(app.current_view, View::Assistant);
    }

    #[test]
    fn test_mounted_vitals_board_and_one_tick() {
        let (_rt, mut app) = test_app();

        let hr = app.board.reading("hr").unwrap();
        assert_eq!(hr.trend.len(), TREND_WINDOW);
        assert!(hr.trend.iter().all(|v| (60.0..=100.0).contains(v)));
        let second = hr.trend[1];

        app.tick_cards();

        let hr = app.board.reading("hr").unwrap();
        assert_eq!(hr.trend.len(), TREND_WINDOW, "tick must preserve length");
        assert_eq!(*hr.trend.front().unwrap(), second, "oldest entry must drop");
        assert_eq!(app.board.chart.len(), CHART_WINDOW);
    }

    #[test]
    fn test_empty_send_is_a_noop() {
        let (_rt, mut app) = test_app();
        app.send_chat();
        assert_eq!(app.chat.messages.len(), 1, "only the greeting");
        assert!(!app.responder.is_waiting());
    }

    #[test]
    fn test_send_appends_user_message_then_canned_reply() {
        let (_rt, mut app) = test_app();
        app.chat.input = "test".to_string();
        app.send_chat();

        assert_eq!(app.chat.messages.len(), 2);
        assert_eq!(app.chat.messages[1].content, "test");
        assert!(app.responder.is_waiting());

        let deadline = Instant::now() + Duration::from_secs(1);
        while app.responder.is_waiting() && Instant::now() < deadline {
            app.poll_replies();
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(app.chat.messages.len(), 3);
        let reply = &app.chat.messages[2];
        assert_eq!(reply.role, crate::sim::Role::Assistant);
        assert!(CANNED_RESPONSES.contains(&reply.content.as_str()));
    }

    #[test]
    fn test_bed_selection_clamps_to_filtered_set() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Beds);

        app.select_last();
        assert_eq!(app.selected_bed_index, app.filtered_bed_count() - 1);

        app.filter_text = "no such patient".to_string();
        assert_eq!(app.filtered_bed_count(), 0);
        assert!(app.selected_bed().is_none());
    }

    #[test]
    fn test_status_filter_yields_subset() {
        let (_rt, mut app) = test_app();
        let all = app.filtered_bed_count();
        app.cycle_status_filter();
        assert!(app.filtered_bed_count() <= all);
        for bed in app.visible_beds() {
            assert!(app.status_filter.matches(bed.status));
        }
    }

    #[test]
    fn test_detail_overlay_requires_beds_view() {
        let (_rt, mut app) = test_app();
        app.enter_detail();
        assert!(!app.show_bed_detail);

        app.set_view(View::Beds);
        app.enter_detail();
        assert!(app.show_bed_detail);

        app.go_back();
        assert!(!app.show_bed_detail);
        assert_eq!(app.current_view, View::Beds, "first Esc only closes the overlay");
    }

    #[test]
    fn test_export_writes_json() {
        let (_rt, app) = test_app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        app.export_state(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value["ward"]["stats"]["occupied"].as_u64().unwrap() as usize,
            app.ward.beds.len()
        );
        assert_eq!(value["vitals"]["readings"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_regenerate_resets_selection() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Beds);
        app.select_last();
        app.regenerate();
        assert_eq!(app.selected_bed_index, 0);
        assert!(app.get_status_message().is_some());
    }
}
