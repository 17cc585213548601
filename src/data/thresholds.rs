//! Threshold-based severity classification.
//!
//! Each metric family has an ascending list of breakpoints. A value belongs
//! to the first bucket whose upper bound is greater than or equal to it, so a
//! value sitting exactly on a breakpoint falls into the lower bucket.

use serde::{Deserialize, Serialize};

use super::sample::Metric;

/// Qualitative severity bucket for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The value was absent.
    Unknown,
    /// The metric is shown but never classified.
    Informational,
    Cold,
    Cool,
    Warm,
    Hot,
    ExtremeHot,
    LowHumidity,
    NormalHumidity,
    HighHumidity,
    Calm,
    Moderate,
    Strong,
}

impl Severity {
    /// Returns a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unknown => "unknown",
            Severity::Informational => "",
            Severity::Cold => "cold",
            Severity::Cool => "cool",
            Severity::Warm => "warm",
            Severity::Hot => "hot",
            Severity::ExtremeHot => "extreme",
            Severity::LowHumidity => "dry",
            Severity::NormalHumidity => "normal",
            Severity::HighHumidity => "humid",
            Severity::Calm => "calm",
            Severity::Moderate => "breezy",
            Severity::Strong => "strong",
        }
    }
}

const TEMPERATURE_BUCKETS: [Severity; 5] = [
    Severity::Cold,
    Severity::Cool,
    Severity::Warm,
    Severity::Hot,
    Severity::ExtremeHot,
];
const HUMIDITY_BUCKETS: [Severity; 3] =
    [Severity::LowHumidity, Severity::NormalHumidity, Severity::HighHumidity];
const WIND_BUCKETS: [Severity; 3] = [Severity::Calm, Severity::Moderate, Severity::Strong];

/// Breakpoint table for every classified metric family.
///
/// Deserializable so that it can be overridden from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Upper bounds of cold, cool, warm and hot (°F). Above the last is extreme.
    pub temperature: [f64; 4],
    /// Upper bounds of low and normal humidity (%). Above the last is high.
    pub humidity: [f64; 2],
    /// Upper bounds of calm and moderate wind (mph). Above the last is strong.
    pub wind: [f64; 2],
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: [32.0, 50.0, 75.0, 90.0],
            humidity: [30.0, 70.0],
            wind: [10.0, 25.0],
        }
    }
}

impl Thresholds {
    /// Classify a metric value.
    pub fn classify(&self, metric: Metric, value: Option<f64>) -> Severity {
        let Some(value) = value else {
            return Severity::Unknown;
        };

        match metric {
            Metric::Temperature | Metric::FeelsLike => {
                TEMPERATURE_BUCKETS[bucket_index(&self.temperature, value)]
            }
            Metric::Humidity => HUMIDITY_BUCKETS[bucket_index(&self.humidity, value)],
            Metric::WindSpeed | Metric::WindGust => {
                WIND_BUCKETS[bucket_index(&self.wind, value)]
            }
            Metric::DewPoint
            | Metric::WindDirection
            | Metric::Pressure
            | Metric::PrecipRate
            | Metric::PrecipTotal => Severity::Informational,
        }
    }

    /// Check that every breakpoint list is finite and strictly ascending.
    pub fn validate(&self) -> Result<(), String> {
        check_ascending("temperature", &self.temperature)?;
        check_ascending("humidity", &self.humidity)?;
        check_ascending("wind", &self.wind)
    }
}

/// Index of the first breakpoint that is >= value, or the overflow bucket.
fn bucket_index(breakpoints: &[f64], value: f64) -> usize {
    breakpoints
        .iter()
        .position(|&upper| value <= upper)
        .unwrap_or(breakpoints.len())
}

fn check_ascending(name: &str, breakpoints: &[f64]) -> Result<(), String> {
    if breakpoints.iter().any(|b| !b.is_finite()) {
        return Err(format!("{} thresholds must be finite numbers", name));
    }
    if breakpoints.windows(2).any(|w| w[0] >= w[1]) {
        return Err(format!(
            "{} thresholds must be strictly ascending, got {:?}",
            name, breakpoints
        ));
    }
    Ok(())
}
