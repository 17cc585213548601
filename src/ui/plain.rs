//! Plain-text display for terminals without full-screen support.
//!
//! Clears the screen and prints the whole frame whenever a new tick arrives.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use super::common::{format_local, observed_at};
use super::Renderer;
use crate::app::App;
use crate::data::{DisplayFrame, Severity};

const RULE_WIDTH: usize = 70;

/// Render a frame as plain text.
pub fn format_frame(display: &DisplayFrame, app: &App) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let station = display
        .station_id
        .as_deref()
        .unwrap_or(&app.config.station_id);

    let mut lines = vec![
        rule.clone(),
        format!("  Personal Weather Station Monitor: {}", station),
        format!(
            "  (Refreshing every {}s. Press Ctrl+C to exit)",
            app.config.interval_secs
        ),
        rule.clone(),
    ];

    if let Some(ref err) = display.error {
        lines.push(String::new());
        lines.push(format!("Error: {}", err));
        lines.push(format!(
            "Retrying in {} seconds...",
            app.config.interval_secs
        ));
    }

    lines.push(String::new());
    if let Some(observed) = observed_at(display) {
        lines.push(format!("Observed:     {}", observed));
    }
    if let Some(ref time) = app.last_update {
        lines.push(format!("Last Updated: {}", format_local(time)));
    }
    lines.push(String::new());

    lines.push("CURRENT CONDITIONS:".to_string());
    lines.push("-".repeat(20));
    for row in &display.rows {
        let label = format!("{}:", row.label());
        // No colors here, so name the bucket instead.
        let severity = match row.severity {
            Severity::Unknown | Severity::Informational => String::new(),
            other => format!(" [{}]", other.label()),
        };
        let line = format!(
            "{:<16}{}{} {}",
            label,
            row.display,
            severity,
            row.trend_symbol()
        );
        lines.push(line.trim_end().to_string());
    }

    lines.push(String::new());
    lines.push(format!("TRENDS (last {} readings):", display.readings));
    lines.push("-".repeat(10));
    if display.has_trend_data() {
        for row in &display.rows {
            let Some(ref spark) = row.sparkline else {
                continue;
            };
            let label = format!("{}:", row.label());
            let range = row.range_label().unwrap_or_default();
            let line = format!("{:<14}{} {}", label, spark, range);
            lines.push(line.trim_end().to_string());
        }
    } else {
        lines.push("Collecting data for trend graphs...".to_string());
    }

    lines.push(rule);
    lines.join("\n")
}

/// Renderer that writes text frames to any writer (stdout in practice).
#[derive(Debug)]
pub struct PlainRenderer<W: Write> {
    out: W,
    /// Tick count of the last printed frame.
    drawn_tick: Option<u64>,
}

impl<W: Write> PlainRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            drawn_tick: None,
        }
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PlainRenderer<W> {
    fn draw(&mut self, app: &App) -> Result<()> {
        if app.latest.is_none() || self.drawn_tick == Some(app.ticks) {
            return Ok(());
        }

        let display = app.frame(app.config.sparkline.plain);
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(self.out, "{}", format_frame(&display, app))?;
        self.out.flush()?;

        self.drawn_tick = Some(app.ticks);
        Ok(())
    }

    fn handle_input(&mut self, _app: &mut App, timeout: Duration) -> Result<()> {
        // No key handling without raw mode; Ctrl+C ends the process.
        std::thread::sleep(timeout);
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        writeln!(self.out, "\nMonitor stopped.")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::data::{Observation, RawObservation};
    use crate::source::ChannelSource;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn record(temp: f64) -> Observation {
        let record: RawObservation = serde_json::from_value(json!({
            "stationID": "KTEST1",
            "obsTimeLocal": "2024-06-01 14:05:00",
            "epoch": 1717272300,
            "humidity": 45,
            "winddir": 270,
            "imperial": { "temp": temp, "windSpeed": 5.0, "pressure": 30.01 }
        }))
        .unwrap();
        Observation::Record(record)
    }

    fn test_app() -> (mpsc::Sender<Observation>, App) {
        let (tx, source) = ChannelSource::create("test");
        let config = MonitorConfig {
            station_id: "KTEST1".to_string(),
            ..MonitorConfig::default()
        };
        (tx, App::new(Box::new(source), config))
    }

    #[test]
    fn test_format_frame_first_tick() {
        let (tx, mut app) = test_app();
        tx.try_send(record(71.3)).unwrap();
        app.reload_data().unwrap();

        let text = format_frame(&app.frame(30), &app);
        assert!(text.contains("Personal Weather Station Monitor: KTEST1"));
        assert!(text.contains("Observed:     2024-06-01 14:05:00"));
        assert!(text.contains("Temperature:    71.3°F [warm] ─"));
        assert!(text.contains("Wind Speed:     5.0 mph from 270°"));
        assert!(text.contains("Collecting data for trend graphs..."));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_format_frame_trends() {
        let (tx, mut app) = test_app();
        tx.try_send(record(70.0)).unwrap();
        tx.try_send(record(72.0)).unwrap();
        while app.reload_data().unwrap() {}

        let text = format_frame(&app.frame(30), &app);
        assert!(text.contains("Temperature:    72.0°F [warm] ↗"));
        assert!(text.contains("TRENDS (last 2 readings):"));
        let spark_line = text
            .lines()
            .find(|l| l.starts_with("Temperature:  ▁"))
            .unwrap();
        assert!(spark_line.ends_with("(70.0 - 72.0°F)"));
    }

    #[test]
    fn test_format_frame_error_tick() {
        let (tx, mut app) = test_app();
        tx.try_send(record(70.0)).unwrap();
        tx.try_send(record(72.0)).unwrap();
        tx.try_send(Observation::Error("Received empty response from server".to_string()))
            .unwrap();
        while app.reload_data().unwrap() {}

        let text = format_frame(&app.frame(30), &app);
        assert!(text.contains("Error: Received empty response from server"));
        assert!(text.contains("Retrying in 60 seconds..."));
        assert!(text.contains("Temperature:    N/A ─"));
        assert!(!text.contains('↗'));
        // History stays visible below the error
        assert!(text.contains("(70.0 - 72.0°F)"));
    }

    #[test]
    fn test_plain_renderer_draws_once_per_tick() {
        let (tx, mut app) = test_app();
        let mut renderer = PlainRenderer::new(Vec::new());

        // Nothing before the first tick
        renderer.draw(&app).unwrap();
        assert!(renderer.out.is_empty());

        tx.try_send(record(70.0)).unwrap();
        app.reload_data().unwrap();
        renderer.draw(&app).unwrap();
        let first_len = renderer.out.len();
        assert!(first_len > 0);

        renderer.draw(&app).unwrap();
        assert_eq!(renderer.out.len(), first_len);

        tx.try_send(record(71.0)).unwrap();
        app.reload_data().unwrap();
        renderer.draw(&app).unwrap();
        assert!(renderer.out.len() > first_len);

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("71.0°F"));
    }
}
