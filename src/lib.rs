//! # wxwatch
//!
//! A terminal monitor and library for personal weather stations (PWS).
//!
//! This crate polls a station's current observation, keeps a bounded history
//! of recent readings, and turns that history into trend arrows, severity
//! colors and fixed-width sparklines. It can receive observations from the
//! Weather Underground API, a saved response file, or an in-process channel,
//! and display them full-screen or as plain text.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (trends) │    │(Renderer)    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view switching, export
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for HTTP polling, file reads, and channel-based input
//! - **[`data`]**: Decoding, the bounded [`History`], trend and severity
//!   classification, sparklines, and the per-tick [`DisplayFrame`]
//! - **[`ui`]**: The [`Renderer`](ui::Renderer) trait with a ratatui renderer and a
//!   plain-text renderer
//! - **[`config`]** and **[`logging`]**: layered settings and file-backed tracing
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Monitor a station
//! wxwatch KCOHOTSU8 --api-key $KEY
//!
//! # Plain text, five-minute interval
//! wxwatch KCOHOTSU8 --plain --interval 300
//!
//! # Replay a saved API response
//! wxwatch --file observation.json
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use wxwatch::{App, FileSource, MonitorConfig};
//!
//! let source = Box::new(FileSource::new("observation.json"));
//! let app = App::new(source, MonitorConfig::default());
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use wxwatch::{App, ChannelSource, MonitorConfig, Observation};
//!
//! let (tx, source) = ChannelSource::create("bridge");
//! let mut app = App::new(Box::new(source), MonitorConfig::default());
//!
//! tx.try_send(Observation::Error("station offline".to_string())).unwrap();
//! app.reload_data().unwrap();
//! assert_eq!(app.history.count(), 1);
//! ```
//!
//! ### Using the trend engine directly
//!
//! ```
//! use wxwatch::data::{Decoded, History, Metric, Observation, Trend};
//!
//! let mut history = History::new(60);
//! for temp in [70.0, 70.5, 71.0] {
//!     let record = serde_json::from_value(serde_json::json!({
//!         "epoch": 1717272300,
//!         "imperial": { "temp": temp }
//!     }))
//!     .unwrap();
//!     history.append(&Decoded::from_observation(&Observation::Record(record)));
//! }
//!
//! assert_eq!(history.trend(Metric::Temperature, 0.1), Trend::Rising);
//! assert_eq!(history.sparkline(Metric::Temperature, 5), "▁▄█──");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::MonitorConfig;
pub use data::{
    Decoded, DisplayFrame, History, Metric, MetricRow, Observation, RawObservation, Sample,
    Severity, Thresholds, Trend,
};
pub use source::{ChannelSource, DataSource, FetchError, FileSource, HttpSource, WeatherClient};
