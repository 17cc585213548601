//! File-based data source.
//!
//! Reads a saved API response from disk on every tick.

use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_response, to_observation, DataSource, FetchError};
use crate::data::Observation;

/// A data source that reads observations from a JSON file.
///
/// The file holds a response body in the PWS API format
/// (`{"observations": [...]}`). It is re-read on every poll, so each poll is
/// one tick; read and parse failures become error ticks.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<crate::data::RawObservation, FetchError> {
        let content = fs::read_to_string(&self.path)?;
        parse_response(&content, &self.path.display().to_string())
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Observation> {
        let observation = to_observation(self.read_file());
        self.last_error = match &observation {
            Observation::Record(_) => None,
            Observation::Error(msg) => Some(msg.clone()),
        };
        Some(observation)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
