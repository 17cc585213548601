//! Data source abstraction for receiving observations.
//!
//! This module provides a trait-based abstraction for receiving one
//! [`Observation`] per tick from various sources (the PWS HTTP API, a saved
//! response file, or an in-memory channel).

mod channel;
mod error;
mod file;
mod http;

pub use channel::ChannelSource;
pub use error::FetchError;
pub use file::FileSource;
pub use http::{HttpSource, WeatherClient};

use std::fmt::Debug;

use serde::Deserialize;

use crate::data::{Observation, RawObservation};

/// Trait for receiving observations from various sources.
///
/// Implementations of this trait provide ticks from different backends -
/// HTTP polling, file reads, or in-memory channels.
///
/// # Example
///
/// ```
/// use wxwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("observation.json");
/// if let Some(observation) = source.poll() {
///     println!("tick: {:?}", observation);
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the next tick.
    ///
    /// Returns `Some(observation)` if a tick happened (successful or not),
    /// `None` otherwise. This method should be non-blocking.
    fn poll(&mut self) -> Option<Observation>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error message of the last failed tick, if any.
    fn error(&self) -> Option<&str>;
}

/// Envelope returned by the current-observation endpoint.
#[derive(Debug, Deserialize)]
struct ObservationsEnvelope {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

/// Extract the first observation from an API response body.
pub fn parse_response(body: &str, station_id: &str) -> Result<RawObservation, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyResponse);
    }

    let envelope: ObservationsEnvelope =
        serde_json::from_str(body).map_err(|_| FetchError::InvalidFormat)?;

    envelope
        .observations
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NoObservations(station_id.to_string()))
}

/// Convert a fetch result into the tick handed to the monitor.
pub(crate) fn to_observation(result: Result<RawObservation, FetchError>) -> Observation {
    match result {
        Ok(record) => Observation::Record(record),
        Err(e) => Observation::Error(e.to_string()),
    }
}
