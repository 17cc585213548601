//! Short-term trend direction.

use serde::{Deserialize, Serialize};

/// Number of most recent entries a trend is computed over.
pub const TREND_WINDOW: usize = 3;

/// Minimum absolute change between the oldest and newest values that
/// counts as movement. Shared by every metric regardless of unit.
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Direction of a metric over the last few readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
    Unknown,
}

impl Trend {
    /// Returns the glyph shown next to the current value.
    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Rising => "↗",
            Trend::Falling => "↘",
            Trend::Flat | Trend::Unknown => "─",
        }
    }
}

/// Estimate the trend of a series (oldest first).
///
/// Only the last [`TREND_WINDOW`] entries are considered. Absent entries are
/// dropped and the delta is taken between the oldest and newest survivors,
/// which need not be adjacent.
pub fn estimate(series: &[Option<f64>], epsilon: f64) -> Trend {
    let start = series.len().saturating_sub(TREND_WINDOW);
    let recent: Vec<f64> = series[start..].iter().flatten().copied().collect();

    if recent.len() < 2 {
        return Trend::Unknown;
    }

    let delta = recent[recent.len() - 1] - recent[0];
    if delta.abs() < epsilon {
        Trend::Flat
    } else if delta > 0.0 {
        Trend::Rising
    } else {
        Trend::Falling
    }
}
