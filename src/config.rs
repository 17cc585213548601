//! Monitor configuration.
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional config file (TOML, YAML or JSON), `WXWATCH_*` environment
//! variables (`__` separates nested keys, e.g. `WXWATCH_SPARKLINE__PLAIN=40`),
//! and finally command-line flags applied by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::history::DEFAULT_CAPACITY;
use crate::data::trend::DEFAULT_EPSILON;
use crate::data::Thresholds;

/// Weather Underground current-observation endpoint.
pub const DEFAULT_API_URL: &str = "https://api.weather.com/v2/pws/observations/current";

/// Browser user agent; the API rejects some default client agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "WXWATCH";

/// How frames are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Full-screen ratatui interface.
    #[default]
    Rich,
    /// Clear-screen plain text, for dumb terminals and logs.
    Plain,
}

/// Sparkline width per display context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineWidths {
    /// Inline graphs in the conditions table.
    pub compact: usize,
    /// Graphs in the plain-text display.
    pub plain: usize,
    /// Graphs in the dedicated trends view.
    pub trends: usize,
}

impl Default for SparklineWidths {
    fn default() -> Self {
        Self {
            compact: 25,
            plain: 30,
            trends: 40,
        }
    }
}

/// Complete monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// PWS station to query (e.g. `KCOHOTSU8`).
    pub station_id: String,
    pub api_key: Option<String>,
    pub api_url: String,
    pub user_agent: String,
    /// Seconds between ticks.
    pub interval_secs: u64,
    pub request_timeout_secs: u64,
    /// Ticks kept in history.
    pub history_capacity: usize,
    /// Minimum change that counts as a trend.
    pub trend_epsilon: f64,
    pub sparkline: SparklineWidths,
    pub display: DisplayMode,
    pub thresholds: Thresholds,
    /// Log destination; logging is disabled when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            station_id: String::new(),
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            interval_secs: 60,
            request_timeout_secs: 10,
            history_capacity: DEFAULT_CAPACITY,
            trend_epsilon: DEFAULT_EPSILON,
            sparkline: SparklineWidths::default(),
            display: DisplayMode::default(),
            thresholds: Thresholds::default(),
            log_file: None,
        }
    }
}

impl MonitorConfig {
    /// Load from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: MonitorConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Reject settings the trend engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            bail!("history_capacity must be at least 1");
        }
        if self.interval_secs == 0 {
            bail!("interval_secs must be at least 1");
        }
        let SparklineWidths {
            compact,
            plain,
            trends,
        } = self.sparkline;
        if compact == 0 || plain == 0 || trends == 0 {
            bail!("sparkline widths must be positive");
        }
        if !self.trend_epsilon.is_finite() || self.trend_epsilon < 0.0 {
            bail!("trend_epsilon must be a non-negative number");
        }
        if let Err(msg) = self.thresholds.validate() {
            bail!(msg);
        }
        Ok(())
    }

    /// Check the settings needed to talk to the PWS API.
    pub fn validate_remote(&self) -> Result<()> {
        if self.station_id.trim().is_empty() {
            bail!("a station id is required (argument or WXWATCH_STATION_ID)");
        }
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => bail!("an API key is required (--api-key or WXWATCH_API_KEY)"),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
