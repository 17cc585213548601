//! Historical data tracking for sparklines and trends.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use super::sample::{Decoded, Metric};
use super::sparkline;
use super::trend::{self, Trend};

/// Default number of ticks to keep (one hour at a 60-second interval).
pub const DEFAULT_CAPACITY: usize = 60;

/// Bounded per-metric history of recent ticks.
///
/// Every append pushes exactly one entry (possibly absent) onto each tracked
/// series and onto the timestamp series, so all series stay the same length
/// and index-aligned.
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    /// Values per tracked metric, oldest first.
    series: HashMap<Metric, VecDeque<Option<f64>>>,
    /// Observation timestamps (seconds since epoch), oldest first.
    timestamps: VecDeque<Option<i64>>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Create an empty history holding at most `capacity` ticks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");
        Self {
            capacity,
            series: Metric::TRACKED
                .iter()
                .map(|&m| (m, VecDeque::with_capacity(capacity)))
                .collect(),
            timestamps: VecDeque::with_capacity(capacity),
        }
    }

    /// Record one tick, evicting the oldest entry when full.
    pub fn append(&mut self, tick: &Decoded) {
        for (&metric, values) in self.series.iter_mut() {
            values.push_back(tick.value(metric));
            if values.len() > self.capacity {
                values.pop_front();
            }
        }

        self.timestamps.push_back(tick.timestamp());
        if self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
        }
    }

    /// Snapshot of a metric's series, oldest first.
    ///
    /// Returns an empty Vec for metrics that are not tracked.
    pub fn series(&self, metric: Metric) -> Vec<Option<f64>> {
        self.series
            .get(&metric)
            .map(|values| values.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of ticks currently held.
    pub fn count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Observation timestamps, oldest first. Absent for error ticks and
    /// records without an epoch.
    pub fn timestamps(&self) -> Vec<Option<i64>> {
        self.timestamps.iter().copied().collect()
    }

    /// Most recent value of a metric, if the last tick had one.
    pub fn latest(&self, metric: Metric) -> Option<f64> {
        self.series.get(&metric)?.back().copied().flatten()
    }

    /// Minimum and maximum of the values present in a metric's series.
    pub fn range(&self, metric: Metric) -> Option<(f64, f64)> {
        let values = self.series.get(&metric)?;
        values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
    }

    /// Trend of a metric over its most recent entries.
    pub fn trend(&self, metric: Metric, epsilon: f64) -> Trend {
        trend::estimate(&self.series(metric), epsilon)
    }

    /// Sparkline of a metric's whole series.
    pub fn sparkline(&self, metric: Metric, width: usize) -> String {
        sparkline::render(&self.series(metric), width)
    }

    /// Serializable copy of the buffer contents.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            capacity: self.capacity,
            timestamps: self.timestamps(),
            series: Metric::TRACKED.iter().map(|&m| (m, self.series(m))).collect(),
        }
    }
}

/// Plain-data view of a [`History`], used for export.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySnapshot {
    pub capacity: usize,
    pub timestamps: Vec<Option<i64>>,
    pub series: Vec<(Metric, Vec<Option<f64>>)>,
}
