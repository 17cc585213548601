//! HTTP polling data source.
//!
//! Fetches the current observation for one station from the PWS API on a
//! fixed interval and hands each result to the monitor as a tick.

use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::{parse_response, to_observation, DataSource, FetchError};
use crate::config::MonitorConfig;
use crate::data::{Observation, RawObservation};

/// Client for the current-observation endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    endpoint: String,
    station_id: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a client for `station_id` against `endpoint`.
    pub fn new(
        endpoint: &str,
        station_id: &str,
        api_key: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            station_id: station_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build a client from the monitor configuration.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.api_url,
            &config.station_id,
            config.api_key.as_deref().unwrap_or_default(),
            &config.user_agent,
            config.request_timeout(),
        )
    }

    /// Station this client asks for.
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Fetch the most recent observation.
    pub async fn fetch(&self) -> Result<RawObservation, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("stationId", self.station_id.as_str()),
                ("format", "json"),
                ("units", "e"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        // The API answers 204 with an empty body when the station is offline.
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Err(FetchError::EmptyResponse);
        }

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        parse_response(&body, &self.station_id)
    }
}

/// A data source that polls the PWS API in a background task.
///
/// The task fetches once immediately, then once per interval. Every fetch,
/// successful or not, is delivered as one tick.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wxwatch::{HttpSource, WeatherClient};
///
/// # tokio_test::block_on(async {
/// let client = WeatherClient::new(
///     "https://api.weather.com/v2/pws/observations/current",
///     "KTEST1",
///     "secret",
///     "wxwatch",
///     Duration::from_secs(10),
/// )
/// .unwrap();
/// let source = HttpSource::spawn(client, Duration::from_secs(60));
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<Observation>,
    description: String,
    last_error: Option<String>,
}

impl HttpSource {
    /// Spawn the polling task. Must be called from within a tokio runtime.
    pub fn spawn(client: WeatherClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let description = format!("station: {}", client.station_id());

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let result = client.fetch().await;
                match &result {
                    Ok(record) => tracing::debug!(
                        station = client.station_id(),
                        epoch = ?record.epoch,
                        "fetched observation"
                    ),
                    Err(e) => tracing::warn!(
                        station = client.station_id(),
                        error = %e,
                        "observation fetch failed"
                    ),
                }

                if tx.send(to_observation(result)).await.is_err() {
                    // Receiver dropped
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            description,
            last_error: None,
        }
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<Observation> {
        match self.receiver.try_recv() {
            Ok(observation) => {
                self.last_error = match &observation {
                    Observation::Record(_) => None,
                    Observation::Error(msg) => Some(msg.clone()),
                };
                Some(observation)
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.last_error = Some("Fetch task stopped".to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
