//! Observation decoding.
//!
//! Converts one raw PWS observation record into a typed [`Sample`] where every
//! metric is independently present or absent. Decoding never fails: a field
//! that is missing, non-numeric or non-finite simply becomes absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A weather metric reported by the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    FeelsLike,
    DewPoint,
    Humidity,
    WindSpeed,
    WindGust,
    WindDirection,
    Pressure,
    PrecipRate,
    PrecipTotal,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 10] = [
        Metric::Temperature,
        Metric::FeelsLike,
        Metric::DewPoint,
        Metric::Humidity,
        Metric::WindSpeed,
        Metric::WindGust,
        Metric::WindDirection,
        Metric::Pressure,
        Metric::PrecipRate,
        Metric::PrecipTotal,
    ];

    /// Metrics kept in the history buffer.
    pub const TRACKED: [Metric; 6] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Pressure,
        Metric::WindSpeed,
        Metric::WindGust,
        Metric::PrecipRate,
    ];

    /// Whether the history buffer keeps a series for this metric.
    pub fn is_tracked(self) -> bool {
        Self::TRACKED.contains(&self)
    }

    /// Returns the display label for this metric.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::FeelsLike => "Feels Like",
            Metric::DewPoint => "Dew Point",
            Metric::Humidity => "Humidity",
            Metric::WindSpeed => "Wind Speed",
            Metric::WindGust => "Wind Gust",
            Metric::WindDirection => "Wind Dir",
            Metric::Pressure => "Pressure",
            Metric::PrecipRate => "Precip Rate",
            Metric::PrecipTotal => "Precip Total",
        }
    }

    /// Unit suffix used when formatting values.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature | Metric::FeelsLike | Metric::DewPoint => "°F",
            Metric::Humidity => "%",
            Metric::WindSpeed | Metric::WindGust => " mph",
            Metric::WindDirection => "°",
            Metric::Pressure => " inHg",
            Metric::PrecipRate => " in/hr",
            Metric::PrecipTotal => " in",
        }
    }

    /// Number of decimals shown for this metric.
    pub fn precision(self) -> usize {
        match self {
            Metric::Humidity | Metric::WindDirection => 0,
            Metric::Temperature
            | Metric::FeelsLike
            | Metric::DewPoint
            | Metric::WindSpeed
            | Metric::WindGust => 1,
            Metric::Pressure | Metric::PrecipRate | Metric::PrecipTotal => 2,
        }
    }

    /// Format a value with this metric's precision and unit.
    pub fn format_value(self, value: f64) -> String {
        format!("{:.*}{}", self.precision(), value, self.unit())
    }

    /// Format a value without the unit suffix.
    pub fn format_number(self, value: f64) -> String {
        format!("{:.*}", self.precision(), value)
    }
}

/// The `imperial` block of an upstream observation.
///
/// Fields are kept as raw JSON values so that a malformed field only makes
/// that one metric absent instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImperialBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_index: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dewpt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_total: Option<Value>,
}

/// One observation record as returned by the PWS API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(
        rename = "stationID",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub station_id: Option<String>,
    #[serde(
        rename = "obsTimeLocal",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub obs_time_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winddir: Option<Value>,
    #[serde(default, deserialize_with = "lenient_imperial")]
    pub imperial: ImperialBlock,
}

/// Strings pass through, numbers are stringified, anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A null or non-object `imperial` block decodes as an empty one.
fn lenient_imperial<'de, D>(deserializer: D) -> Result<ImperialBlock, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).unwrap_or_default(),
        _ => ImperialBlock::default(),
    })
}

impl RawObservation {
    /// Raw field backing a metric.
    pub fn field(&self, metric: Metric) -> Option<&Value> {
        match metric {
            Metric::Temperature => self.imperial.temp.as_ref(),
            Metric::FeelsLike => self.imperial.heat_index.as_ref(),
            Metric::DewPoint => self.imperial.dewpt.as_ref(),
            Metric::Humidity => self.humidity.as_ref(),
            Metric::WindSpeed => self.imperial.wind_speed.as_ref(),
            Metric::WindGust => self.imperial.wind_gust.as_ref(),
            Metric::WindDirection => self.winddir.as_ref(),
            Metric::Pressure => self.imperial.pressure.as_ref(),
            Metric::PrecipRate => self.imperial.precip_rate.as_ref(),
            Metric::PrecipTotal => self.imperial.precip_total.as_ref(),
        }
    }

    fn field_mut(&mut self, metric: Metric) -> &mut Option<Value> {
        match metric {
            Metric::Temperature => &mut self.imperial.temp,
            Metric::FeelsLike => &mut self.imperial.heat_index,
            Metric::DewPoint => &mut self.imperial.dewpt,
            Metric::Humidity => &mut self.humidity,
            Metric::WindSpeed => &mut self.imperial.wind_speed,
            Metric::WindGust => &mut self.imperial.wind_gust,
            Metric::WindDirection => &mut self.winddir,
            Metric::Pressure => &mut self.imperial.pressure,
            Metric::PrecipRate => &mut self.imperial.precip_rate,
            Metric::PrecipTotal => &mut self.imperial.precip_total,
        }
    }
}

/// Result of one polling tick, as handed over by a data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// The upstream returned an observation record.
    Record(RawObservation),
    /// The fetch failed; the message is shown to the user.
    Error(String),
}

/// One decoded observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sample {
    /// Observation time in seconds since the epoch, only when the record carried one.
    pub timestamp: Option<i64>,
    pub station_id: Option<String>,
    pub obs_time_local: Option<String>,
    values: BTreeMap<Metric, f64>,
}

impl Sample {
    /// Decode a raw record. Never fails; unconvertible fields are absent.
    pub fn decode(record: &RawObservation) -> Self {
        let values = Metric::ALL
            .iter()
            .filter_map(|&metric| record.field(metric).and_then(to_number).map(|v| (metric, v)))
            .collect();

        Self {
            timestamp: record.epoch.as_ref().and_then(to_epoch),
            station_id: record.station_id.clone(),
            obs_time_local: record.obs_time_local.clone(),
            values,
        }
    }

    /// Value of a metric, if present.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Re-derive the raw record from this sample.
    pub fn to_record(&self) -> RawObservation {
        let mut record = RawObservation {
            station_id: self.station_id.clone(),
            obs_time_local: self.obs_time_local.clone(),
            epoch: self.timestamp.map(Value::from),
            ..Default::default()
        };
        for (&metric, &value) in &self.values {
            *record.field_mut(metric) = Some(Value::from(value));
        }
        record
    }
}

/// A decoded tick: either a sample or an explicit "no data" marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Sample(Sample),
    NoData(String),
}

impl Decoded {
    /// Decode one observation.
    pub fn from_observation(observation: &Observation) -> Self {
        match observation {
            Observation::Record(record) => Decoded::Sample(Sample::decode(record)),
            Observation::Error(message) => Decoded::NoData(message.clone()),
        }
    }

    pub fn sample(&self) -> Option<&Sample> {
        match self {
            Decoded::Sample(sample) => Some(sample),
            Decoded::NoData(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Decoded::Sample(_) => None,
            Decoded::NoData(message) => Some(message),
        }
    }

    /// Value of a metric for this tick; always absent for "no data".
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.sample().and_then(|s| s.get(metric))
    }

    /// Observation timestamp for this tick.
    pub fn timestamp(&self) -> Option<i64> {
        self.sample().and_then(|s| s.timestamp)
    }
}

fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn to_epoch(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| to_number(value).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> RawObservation {
        serde_json::from_value(json!({
            "stationID": "KCOHOTSU8",
            "obsTimeLocal": "2024-06-01 14:05:00",
            "epoch": 1717272300,
            "humidity": 41,
            "winddir": 270,
            "imperial": {
                "temp": 72.5,
                "heatIndex": 73.1,
                "dewpt": 47.2,
                "windSpeed": 6.3,
                "windGust": 11.0,
                "pressure": 30.02,
                "precipRate": 0.0,
                "precipTotal": 0.12
            }
        }))
        .unwrap()
    }

    #[test]
    fn decode_full_record() {
        let sample = Sample::decode(&sample_record());

        assert_eq!(sample.timestamp, Some(1717272300));
        assert_eq!(sample.station_id.as_deref(), Some("KCOHOTSU8"));
        assert_eq!(sample.get(Metric::Temperature), Some(72.5));
        assert_eq!(sample.get(Metric::Humidity), Some(41.0));
        assert_eq!(sample.get(Metric::WindDirection), Some(270.0));
        assert_eq!(sample.get(Metric::PrecipRate), Some(0.0));
        assert_eq!(sample.get(Metric::PrecipTotal), Some(0.12));
    }

    #[test]
    fn malformed_fields_are_absent() {
        let record: RawObservation = serde_json::from_value(json!({
            "epoch": 1717272300,
            "humidity": "n/a",
            "winddir": null,
            "imperial": {
                "temp": "68.4",
                "windSpeed": {"oops": true},
                "pressure": [30.0],
                "windGust": "NaN"
            }
        }))
        .unwrap();

        let sample = Sample::decode(&record);
        assert_eq!(sample.get(Metric::Temperature), Some(68.4));
        assert_eq!(sample.get(Metric::Humidity), None);
        assert_eq!(sample.get(Metric::WindDirection), None);
        assert_eq!(sample.get(Metric::WindSpeed), None);
        assert_eq!(sample.get(Metric::Pressure), None);
        assert_eq!(sample.get(Metric::WindGust), None);
        assert_eq!(sample.get(Metric::FeelsLike), None);
    }

    #[test]
    fn missing_epoch_is_not_fabricated() {
        let record: RawObservation =
            serde_json::from_value(json!({"imperial": {"temp": 50.0}})).unwrap();
        let sample = Sample::decode(&record);
        assert_eq!(sample.timestamp, None);
        assert_eq!(sample.get(Metric::Temperature), Some(50.0));
    }

    #[test]
    fn missing_imperial_block_decodes_empty() {
        let record: RawObservation = serde_json::from_value(json!({"humidity": 55})).unwrap();
        let sample = Sample::decode(&record);
        assert_eq!(sample.get(Metric::Humidity), Some(55.0));
        assert_eq!(sample.get(Metric::Temperature), None);
    }

    #[test]
    fn error_observation_decodes_to_no_data() {
        let decoded = Decoded::from_observation(&Observation::Error("timeout".to_string()));
        assert_eq!(decoded.error(), Some("timeout"));
        assert!(decoded.sample().is_none());
        assert_eq!(decoded.value(Metric::Temperature), None);
        assert_eq!(decoded.timestamp(), None);
    }

    #[test]
    fn to_record_round_trips_values() {
        let original = sample_record();
        let sample = Sample::decode(&original);
        let rederived = sample.to_record();

        for metric in Metric::ALL {
            let before = original.field(metric).and_then(to_number);
            let after = rederived.field(metric).and_then(to_number);
            match (before, after) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9, "{:?}", metric),
                (None, None) => {}
                other => panic!("{:?} mismatch: {:?}", metric, other),
            }
        }
        assert_eq!(Sample::decode(&rederived), sample);
    }

    #[test]
    fn format_value_uses_metric_precision() {
        assert_eq!(Metric::Temperature.format_value(72.46), "72.5°F");
        assert_eq!(Metric::Humidity.format_value(41.4), "41%");
        assert_eq!(Metric::Pressure.format_value(30.0), "30.00 inHg");
        assert_eq!(Metric::WindSpeed.format_value(6.24), "6.2 mph");
    }
}
