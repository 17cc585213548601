//! End-to-end tests through the public API.
//!
//! Observations go in through a source, through `App`, and come out as
//! display frames, plain text and export files. Per-module behavior is
//! covered by the inline `#[cfg(test)]` modules.

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use wxwatch::ui::plain::format_frame;
use wxwatch::{
    App, ChannelSource, DataSource, FileSource, Metric, MonitorConfig, Observation,
    RawObservation, Severity, Trend,
};

fn observation(epoch: i64, temp: f64, humidity: f64, wind: f64) -> Observation {
    let record: RawObservation = serde_json::from_value(json!({
        "stationID": "KCOHOTSU8",
        "obsTimeLocal": "2024-06-01 14:05:00",
        "epoch": epoch,
        "humidity": humidity,
        "winddir": 180,
        "imperial": {
            "temp": temp,
            "heatIndex": temp + 1.0,
            "dewpt": 40.2,
            "windSpeed": wind,
            "windGust": wind + 5.0,
            "pressure": 30.02,
            "precipRate": 0.0,
            "precipTotal": 0.12
        }
    }))
    .unwrap();
    Observation::Record(record)
}

fn app_with_capacity(capacity: usize) -> (tokio::sync::mpsc::Sender<Observation>, App) {
    let (tx, source) = ChannelSource::create("integration");
    let config = MonitorConfig {
        station_id: "KCOHOTSU8".to_string(),
        history_capacity: capacity,
        ..MonitorConfig::default()
    };
    (tx, App::new(Box::new(source), config))
}

fn drain(app: &mut App) {
    while app.reload_data().unwrap() {}
}

// ═══════════════════════════════════════════════════════════════════════════
// History through the application
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn error_tick_then_two_good_ticks() {
    let (tx, mut app) = app_with_capacity(60);

    tx.try_send(Observation::Error("Network request failed: timeout".into()))
        .unwrap();
    tx.try_send(observation(100, 70.0, 40.0, 3.0)).unwrap();
    tx.try_send(observation(160, 71.0, 42.0, 4.0)).unwrap();
    drain(&mut app);

    assert_eq!(app.history.count(), 3);
    for metric in Metric::TRACKED {
        assert_eq!(app.history.series(metric)[0], None, "{:?}", metric);
    }
    assert_eq!(app.history.timestamps(), vec![None, Some(100), Some(160)]);
}

#[test]
fn eviction_is_fifo_across_ticks() {
    let (tx, mut app) = app_with_capacity(4);

    for i in 0..7 {
        tx.try_send(observation(i, 60.0 + i as f64, 50.0, 2.0)).unwrap();
    }
    drain(&mut app);

    assert_eq!(app.history.count(), 4);
    assert_eq!(
        app.history.series(Metric::Temperature),
        vec![Some(63.0), Some(64.0), Some(65.0), Some(66.0)]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Frames
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn frame_reflects_trends_and_severity() {
    let (tx, mut app) = app_with_capacity(60);

    tx.try_send(observation(100, 70.0, 20.0, 8.0)).unwrap();
    tx.try_send(observation(160, 70.5, 20.0, 9.0)).unwrap();
    tx.try_send(observation(220, 71.0, 20.0, 12.0)).unwrap();
    drain(&mut app);

    let frame = app.frame(25);
    assert_eq!(frame.station_id.as_deref(), Some("KCOHOTSU8"));
    assert!(frame.error.is_none());

    let temp = frame.row(Metric::Temperature).unwrap();
    assert_eq!(temp.trend, Some(Trend::Rising));
    assert_eq!(temp.severity, Severity::Warm);
    assert_eq!(temp.sparkline.as_deref().map(|s| s.chars().count()), Some(25));

    let humidity = frame.row(Metric::Humidity).unwrap();
    assert_eq!(humidity.trend, Some(Trend::Flat));
    assert_eq!(humidity.severity, Severity::LowHumidity);

    let wind = frame.row(Metric::WindSpeed).unwrap();
    assert_eq!(wind.display, "12.0 mph from 180°");
    assert_eq!(wind.severity, Severity::Moderate);

    // Untracked metrics carry no trend or sparkline
    let dew = frame.row(Metric::DewPoint).unwrap();
    assert_eq!(dew.display, "40.2°F");
    assert_eq!(dew.severity, Severity::Informational);
    assert!(dew.trend.is_none());
    assert!(dew.sparkline.is_none());
}

#[test]
fn error_frame_keeps_prior_history() {
    let (tx, mut app) = app_with_capacity(60);

    tx.try_send(observation(100, 70.0, 50.0, 3.0)).unwrap();
    tx.try_send(observation(160, 75.0, 50.0, 3.0)).unwrap();
    tx.try_send(Observation::Error("Received empty response from server".into()))
        .unwrap();
    drain(&mut app);

    let frame = app.frame(4);
    assert_eq!(
        frame.error.as_deref(),
        Some("Received empty response from server")
    );

    let temp = frame.row(Metric::Temperature).unwrap();
    assert_eq!(temp.display, "N/A");
    assert_eq!(temp.severity, Severity::Unknown);
    assert_eq!(temp.sparkline.as_deref(), Some("▁█──"));
    assert_eq!(temp.trend, Some(Trend::Unknown));
    assert_eq!(temp.trend_symbol(), "─");
}

#[test]
fn plain_text_frame() {
    let (tx, mut app) = app_with_capacity(60);

    tx.try_send(observation(100, 88.0, 75.0, 30.0)).unwrap();
    tx.try_send(observation(160, 87.0, 75.0, 30.0)).unwrap();
    drain(&mut app);

    let text = format_frame(&app.frame(30), &app);
    assert!(text.contains("Temperature:    87.0°F [hot] ↘"));
    assert!(text.contains("Pressure:       30.02 inHg"));
    assert!(text.contains("TRENDS (last 2 readings):"));
    assert!(text.contains("(87.0 - 88.0°F)"));
}

// ═══════════════════════════════════════════════════════════════════════════
// File source and export
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn file_source_drives_app_and_export() {
    let mut file = NamedTempFile::new().unwrap();
    let body = json!({
        "observations": [{
            "stationID": "KCOHOTSU8",
            "epoch": 1717272300,
            "humidity": "61",
            "imperial": { "temp": 58.3, "pressure": "bad" }
        }]
    });
    writeln!(file, "{}", body).unwrap();

    let source = FileSource::new(file.path());
    assert!(source.description().starts_with("file: "));

    let mut app = App::new(Box::new(source), MonitorConfig::default());
    assert!(app.reload_data().unwrap());
    assert!(app.reload_data().unwrap());

    let frame = app.frame(10);
    assert_eq!(frame.readings, 2);
    assert_eq!(frame.row(Metric::Humidity).unwrap().value, Some(61.0));
    assert_eq!(frame.row(Metric::Pressure).unwrap().display, "N/A");

    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("weather_export.json");
    app.export_state(&export_path).unwrap();

    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(exported["frame"]["readings"], 2);
    assert_eq!(
        exported["history"]["timestamps"],
        json!([1717272300, 1717272300])
    );
}

#[test]
fn config_validation_guards_the_core() {
    let config = MonitorConfig {
        history_capacity: 0,
        ..MonitorConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(MonitorConfig::default().validate().is_ok());
}
