use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::enrich::github::DEFAULT_GITHUB_API_URL;
use crate::enrich::twitter::DEFAULT_TWITTER_API_URL;
use crate::enrich::DEFAULT_CONCURRENCY;

/// Optional config file looked up in the working directory (any supported extension)
pub const CONFIG_FILE: &str = "profile_urls";

/// Environment variables with this prefix override file settings
pub const ENV_PREFIX: &str = "PROFILE_URLS";

/// Runtime settings for the enrichment run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Rows processed concurrently
    pub concurrency: usize,

    /// GitHub REST API base URL
    pub github_api_url: String,

    /// X API base URL
    pub twitter_api_url: String,

    /// Optional GitHub token, raises the rate limit
    #[serde(default)]
    pub github_token: Option<String>,

    /// Bearer token for the X API, required by `enrich`
    #[serde(default)]
    pub twitter_bearer_token: Option<String>,

    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,

    /// Write logs to a timestamped file in this directory instead of stderr
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Loads defaults, then `profile_urls.{toml,json,yaml}`, then `PROFILE_URLS_*`
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same as [`AppConfig::load`] with an explicit config file name
    pub fn load_from(file: &str) -> Result<Self> {
        let defaults = AppConfig::default();

        let settings = Config::builder()
            .set_default("concurrency", defaults.concurrency as i64)?
            .set_default("github_api_url", defaults.github_api_url)?
            .set_default("twitter_api_url", defaults.twitter_api_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to load configuration from '{}'", file))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            twitter_api_url: DEFAULT_TWITTER_API_URL.to_string(),
            github_token: None,
            twitter_bearer_token: None,
            request_timeout_secs: 30,
            log_dir: None,
        }
    }
}
