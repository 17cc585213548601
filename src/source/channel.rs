//! Channel-based data source.
//!
//! Receives observations via a tokio mpsc channel. This is useful when the
//! embedding program fetches observations itself and pushes them in.

use tokio::sync::mpsc::{self, error::TryRecvError};

use super::DataSource;
use crate::data::Observation;

/// Ticks buffered between producer and monitor.
const CHANNEL_CAPACITY: usize = 16;

/// A data source that receives observations via a channel.
///
/// Every observation sent is one tick; none are coalesced.
///
/// # Example
///
/// ```
/// use wxwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("weather-bridge");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<Observation>,
    description: String,
    last_error: Option<String>,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of an mpsc channel
    /// * `source_description` - A description of where observations come from
    pub fn new(receiver: mpsc::Receiver<Observation>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            last_error: None,
        }
    }

    /// Create a channel pair for sending observations to a ChannelSource.
    pub fn create(source_description: &str) -> (mpsc::Sender<Observation>, Self) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Observation> {
        match self.receiver.try_recv() {
            Ok(observation) => {
                self.last_error = match &observation {
                    Observation::Record(_) => None,
                    Observation::Error(msg) => Some(msg.clone()),
                };
                Some(observation)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.last_error = Some("Channel closed".to_string());
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
