//! Layered settings: defaults, optional TOML file, then environment.
//!
//! ```toml
//! api_base = "http://192.168.5.110:8080/api"
//! poll_interval = "5s"
//! request_timeout = "4s"
//! demo_on_start = false
//! log_file = "sagin-monitor.log"
//! ```
//!
//! Every key can also be set through `SAGIN_MONITOR_<KEY>` environment
//! variables, e.g. `SAGIN_MONITOR_API_BASE`. Command-line flags override both.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::api::DEFAULT_API_BASE;
use crate::data::duration::parse_duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sagin-monitor.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SAGIN_MONITOR";

/// Raw settings as they appear in files and the environment.
#[derive(Debug, Deserialize)]
struct RawSettings {
    api_base: String,
    poll_interval: String,
    request_timeout: String,
    demo_on_start: bool,
    log_file: Option<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root URL of the monitoring API.
    pub api_base: String,
    /// Time between poll cycles.
    pub poll_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Start demo mode as soon as the dashboard opens.
    pub demo_on_start: bool,
    /// Where tracing output goes; no tracing subscriber is installed if unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(4),
            demo_on_start: false,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `path` (must exist) or from [`DEFAULT_CONFIG_FILE`]
    /// if present, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("poll_interval", "5s")?
            .set_default("request_timeout", "4s")?
            .set_default("demo_on_start", false)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to load configuration")?;

        let raw: RawSettings = config.try_deserialize().context("Invalid configuration")?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let poll_interval = parse_duration(&raw.poll_interval)
            .with_context(|| format!("Invalid poll_interval: {}", raw.poll_interval))?;
        let request_timeout = parse_duration(&raw.request_timeout)
            .with_context(|| format!("Invalid request_timeout: {}", raw.request_timeout))?;

        if poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than zero");
        }
        if request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than zero");
        }

        Ok(Self {
            api_base: raw.api_base,
            poll_interval,
            request_timeout,
            demo_on_start: raw.demo_on_start,
            log_file: raw.log_file,
        })
    }
}
