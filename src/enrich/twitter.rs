use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

use super::github::USER_AGENT;
use super::FollowerLookup;

pub const DEFAULT_TWITTER_API_URL: &str = "https://api.twitter.com";

#[derive(Debug, Deserialize)]
struct UserLookupResponse {
    data: Option<TwitterUser>,
}

#[derive(Debug, Deserialize)]
struct TwitterUser {
    public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Deserialize)]
struct PublicMetrics {
    followers_count: Option<u64>,
}

/// X (Twitter) v2 API client for follower counts
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
    bearer_token: String,
}

impl TwitterClient {
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build X HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        })
    }
}

impl FollowerLookup for TwitterClient {
    /// `Ok(None)` when the user does not exist or hides its metrics
    async fn follower_count(&self, username: &str) -> Result<Option<u64>> {
        let url = format!("{}/2/users/by/username/{}", self.base_url, username);
        trace!("GET {}", url);

        let response: UserLookupResponse = self
            .client
            .get(&url)
            .query(&[("user.fields", "public_metrics")])
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .with_context(|| format!("X request for '{}' failed", username))?
            .error_for_status()
            .with_context(|| format!("X returned an error for '{}'", username))?
            .json()
            .await
            .with_context(|| format!("Invalid X user payload for '{}'", username))?;

        let followers = response
            .data
            .and_then(|user| user.public_metrics)
            .and_then(|metrics| metrics.followers_count);

        debug!("X user {} has {:?} followers", username, followers);
        Ok(followers)
    }
}
