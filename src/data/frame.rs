//! Display frame composition.
//!
//! A [`DisplayFrame`] is everything a renderer needs for one refresh: the
//! current value of every metric with its severity, plus trend and sparkline
//! for the tracked metrics. Frames are rebuilt from the history every tick.

use serde::Serialize;

use super::history::History;
use super::sample::{Decoded, Metric};
use super::thresholds::{Severity, Thresholds};
use super::trend::Trend;

/// Text shown in place of an absent value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One metric line of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: Metric,
    pub value: Option<f64>,
    /// Formatted current value, or [`NOT_AVAILABLE`].
    pub display: String,
    pub severity: Severity,
    /// Present for tracked metrics only.
    pub trend: Option<Trend>,
    /// Present for tracked metrics only.
    pub sparkline: Option<String>,
    /// Min and max over the history, when it holds any value.
    pub range: Option<(f64, f64)>,
}

impl MetricRow {
    pub fn label(&self) -> &'static str {
        self.metric.label()
    }

    /// Glyph for the trend column; blank for untracked metrics.
    pub fn trend_symbol(&self) -> &'static str {
        self.trend.map(|t| t.symbol()).unwrap_or("")
    }

    /// Range label such as `(58.0 - 63.5°F)`.
    pub fn range_label(&self) -> Option<String> {
        let (lo, hi) = self.range?;
        Some(format!(
            "({} - {}{})",
            self.metric.format_number(lo),
            self.metric.format_number(hi),
            self.metric.unit()
        ))
    }
}

/// Everything rendered for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFrame {
    pub station_id: Option<String>,
    /// Observation time as reported by the station.
    pub obs_time_local: Option<String>,
    pub timestamp: Option<i64>,
    /// Error message when the latest tick failed.
    pub error: Option<String>,
    /// Ticks currently held in history.
    pub readings: usize,
    pub capacity: usize,
    pub rows: Vec<MetricRow>,
}

impl DisplayFrame {
    /// Build a frame from the latest tick and the history.
    ///
    /// `latest` is `None` before the first tick arrives.
    pub fn compose(
        latest: Option<&Decoded>,
        history: &History,
        thresholds: &Thresholds,
        epsilon: f64,
        width: usize,
    ) -> Self {
        let value = |metric| latest.and_then(|tick| tick.value(metric));
        let wind_direction = value(Metric::WindDirection);
        // A failed tick shows no direction; the sparkline still shows history.
        let failed = matches!(latest, Some(Decoded::NoData(_)));

        let rows = Metric::ALL
            .iter()
            .filter(|&&m| m != Metric::WindDirection)
            .map(|&metric| {
                let current = value(metric);
                let display = match (metric, current) {
                    (_, None) => NOT_AVAILABLE.to_string(),
                    (Metric::WindSpeed, Some(speed)) => match wind_direction {
                        Some(dir) => format!(
                            "{} from {}",
                            metric.format_value(speed),
                            Metric::WindDirection.format_value(dir)
                        ),
                        None => metric.format_value(speed),
                    },
                    (_, Some(v)) => metric.format_value(v),
                };
                let tracked = metric.is_tracked();

                MetricRow {
                    metric,
                    value: current,
                    display,
                    severity: thresholds.classify(metric, current),
                    trend: tracked.then(|| {
                        if failed {
                            Trend::Unknown
                        } else {
                            history.trend(metric, epsilon)
                        }
                    }),
                    sparkline: tracked.then(|| history.sparkline(metric, width)),
                    range: history.range(metric),
                }
            })
            .collect();

        let sample = latest.and_then(Decoded::sample);
        Self {
            station_id: sample.and_then(|s| s.station_id.clone()),
            obs_time_local: sample.and_then(|s| s.obs_time_local.clone()),
            timestamp: latest.and_then(Decoded::timestamp),
            error: latest.and_then(Decoded::error).map(str::to_string),
            readings: history.count(),
            capacity: history.capacity(),
            rows,
        }
    }

    /// Row for a metric, if the frame shows it.
    pub fn row(&self, metric: Metric) -> Option<&MetricRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }

    /// Whether enough readings exist for trends to mean anything.
    pub fn has_trend_data(&self) -> bool {
        self.readings >= 2
    }
}
