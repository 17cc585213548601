//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::MonitorConfig;
use crate::data::history::HistorySnapshot;
use crate::data::{Decoded, DisplayFrame, History};
use crate::source::DataSource;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Current readings with trend arrows and compact sparklines.
    Conditions,
    /// Wide sparklines for the tracked metrics.
    Trends,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Conditions => View::Trends,
            View::Trends => View::Conditions,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        // Two views: previous and next coincide.
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Conditions => "Conditions",
            View::Trends => "Trends",
        }
    }
}

/// Shape of the export file.
#[derive(Debug, Serialize)]
struct Export {
    frame: DisplayFrame,
    history: HistorySnapshot,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    /// Set by the refresh key, cleared by the renderer once it repaints.
    redraw_requested: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub history: History,
    /// Most recent tick, successful or not.
    pub latest: Option<Decoded>,
    /// Wall-clock time of the last successful tick.
    pub last_update: Option<DateTime<Local>>,
    /// Ticks processed since startup.
    pub ticks: u64,
    pub config: MonitorConfig,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and configuration.
    ///
    /// `config` is expected to be validated already; a zero history capacity
    /// panics here.
    pub fn new(source: Box<dyn DataSource>, config: MonitorConfig) -> Self {
        Self {
            running: true,
            current_view: View::Conditions,
            show_help: false,
            redraw_requested: false,
            source,
            history: History::new(config.history_capacity),
            latest: None,
            last_update: None,
            ticks: 0,
            config,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Error to show, from the latest tick or from the source itself.
    pub fn load_error(&self) -> Option<&str> {
        self.latest
            .as_ref()
            .and_then(Decoded::error)
            .or_else(|| self.source.error())
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for the next tick.
    ///
    /// Returns Ok(true) if a tick was processed, Ok(false) if the source had
    /// nothing new. Failed ticks are processed too: they occupy an absent
    /// slot in history.
    pub fn reload_data(&mut self) -> Result<bool> {
        let Some(observation) = self.source.poll() else {
            return Ok(false);
        };

        let decoded = Decoded::from_observation(&observation);
        self.history.append(&decoded);
        self.ticks += 1;

        match &decoded {
            Decoded::Sample(sample) => {
                self.last_update = Some(Local::now());
                tracing::info!(
                    tick = self.ticks,
                    station = sample.station_id.as_deref().unwrap_or("?"),
                    readings = self.history.count(),
                    "observation recorded"
                );
            }
            Decoded::NoData(err) => {
                tracing::warn!(tick = self.ticks, error = %err, "tick without data");
            }
        }

        self.latest = Some(decoded);
        Ok(true)
    }

    /// Compose the frame for the current tick at the given sparkline width.
    pub fn frame(&self, width: usize) -> DisplayFrame {
        DisplayFrame::compose(
            self.latest.as_ref(),
            &self.history,
            &self.config.thresholds,
            self.config.trend_epsilon,
            width,
        )
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    /// Ask the renderer for a full repaint on its next pass.
    ///
    /// The source is not polled: ticks only come from the poll interval, so
    /// the history length keeps tracking wall-clock time.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns and clears a pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current frame and the raw history to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.latest.is_none() {
            anyhow::bail!("No data to export");
        }

        let export = Export {
            frame: self.frame(self.config.sparkline.compact),
            history: self.history.snapshot(),
        };

        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json)?;

        tracing::info!(path = %path.display(), "exported state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Metric, Observation, RawObservation};
    use crate::source::ChannelSource;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn record(epoch: i64, temp: f64) -> Observation {
        let record: RawObservation = serde_json::from_value(json!({
            "stationID": "KTEST1",
            "epoch": epoch,
            "humidity": 55,
            "imperial": { "temp": temp, "windSpeed": 4.0 }
        }))
        .unwrap();
        Observation::Record(record)
    }

    fn test_app() -> (mpsc::Sender<Observation>, App) {
        let (tx, source) = ChannelSource::create("test");
        let config = MonitorConfig {
            history_capacity: 5,
            ..MonitorConfig::default()
        };
        (tx, App::new(Box::new(source), config))
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Conditions.next(), View::Trends);
        assert_eq!(View::Trends.next(), View::Conditions);
        assert_eq!(View::Conditions.prev(), View::Trends);
        assert_eq!(View::Trends.label(), "Trends");
    }

    #[test]
    fn test_reload_without_tick() {
        let (_tx, mut app) = test_app();
        assert!(!app.reload_data().unwrap());
        assert_eq!(app.ticks, 0);
        assert!(app.latest.is_none());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_reload_records_ticks() {
        let (tx, mut app) = test_app();

        tx.try_send(Observation::Error("offline".to_string())).unwrap();
        tx.try_send(record(100, 70.0)).unwrap();
        tx.try_send(record(160, 71.0)).unwrap();

        while app.reload_data().unwrap() {}

        assert_eq!(app.ticks, 3);
        assert_eq!(app.history.count(), 3);
        assert_eq!(
            app.history.series(Metric::Temperature),
            vec![None, Some(70.0), Some(71.0)]
        );
        assert!(app.last_update.is_some());
        assert!(app.load_error().is_none());
    }

    #[test]
    fn test_error_tick_is_shown() {
        let (tx, mut app) = test_app();

        tx.try_send(record(100, 70.0)).unwrap();
        tx.try_send(Observation::Error("Network request failed: boom".to_string()))
            .unwrap();
        while app.reload_data().unwrap() {}

        assert_eq!(app.load_error(), Some("Network request failed: boom"));
        let frame = app.frame(10);
        assert_eq!(frame.error.as_deref(), Some("Network request failed: boom"));
        assert_eq!(frame.row(Metric::Temperature).unwrap().display, "N/A");
        assert_eq!(frame.readings, 2);
    }

    #[test]
    fn test_history_capacity_from_config() {
        let (tx, mut app) = test_app();
        for i in 0..8 {
            tx.try_send(record(i, 60.0 + i as f64)).unwrap();
        }
        while app.reload_data().unwrap() {}

        assert_eq!(app.history.count(), 5);
        assert_eq!(app.history.latest(Metric::Temperature), Some(67.0));
    }

    #[test]
    fn test_redraw_request_is_taken_once() {
        let (_tx, mut app) = test_app();
        assert!(!app.take_redraw_request());
        app.request_redraw();
        assert!(app.take_redraw_request());
        assert!(!app.take_redraw_request());
        assert_eq!(app.ticks, 0);
    }

    #[test]
    fn test_status_message() {
        let (_tx, mut app) = test_app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("Exported".to_string());
        assert_eq!(app.get_status_message(), Some("Exported"));
    }

    #[test]
    fn test_export_state() {
        let (tx, mut app) = test_app();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        assert!(app.export_state(&path).is_err());

        tx.try_send(record(100, 70.0)).unwrap();
        app.reload_data().unwrap();
        app.export_state(&path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["frame"]["station_id"], "KTEST1");
        assert_eq!(exported["history"]["capacity"], 5);
        assert_eq!(exported["history"]["timestamps"], json!([100]));
    }
}
