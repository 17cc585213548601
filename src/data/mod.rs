//! The historical-trend engine.
//!
//! This module turns a stream of raw, possibly partial observations into
//! classified values, trends and sparklines suitable for display. Nothing in
//! here performs I/O.
//!
//! ## Submodules
//!
//! - [`sample`]: Decoding of raw records into [`Sample`]s ([`Metric`], [`Observation`])
//! - [`thresholds`]: Per-metric breakpoints and [`Severity`] classification
//! - [`history`]: Bounded, index-aligned per-metric series ([`History`])
//! - [`trend`]: Rising/falling/flat direction over the last few readings
//! - [`sparkline`]: Fixed-width glyph rendering of a series
//! - [`frame`]: Composition of everything above into a [`DisplayFrame`]
//!
//! ## Data Flow
//!
//! ```text
//! Observation (record | error)
//!        │
//!        ▼
//! Decoded::from_observation()
//!        │
//!        ├──▶ History::append()
//!        │
//!        ▼
//! DisplayFrame::compose() ──▶ Thresholds::classify()
//!                        ├──▶ trend::estimate()
//!                        └──▶ sparkline::render()
//! ```

pub mod frame;
pub mod history;
pub mod sample;
pub mod sparkline;
pub mod thresholds;
pub mod trend;

pub use frame::{DisplayFrame, MetricRow};
pub use history::History;
pub use sample::{Decoded, Metric, Observation, RawObservation, Sample};
pub use thresholds::{Severity, Thresholds};
pub use trend::Trend;
