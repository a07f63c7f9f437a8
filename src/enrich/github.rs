use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

use super::FollowerLookup;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// User agent sent with every API request
pub(crate) const USER_AGENT: &str = concat!("profile_urls/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GitHubUser {
    followers: Option<u64>,
}

/// Minimal GitHub REST client for follower counts
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client against `base_url`, authenticating with `token` when given
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl FollowerLookup for GitHubClient {
    async fn follower_count(&self, username: &str) -> Result<Option<u64>> {
        let url = format!("{}/users/{}", self.base_url, username);
        trace!("GET {}", url);

        let mut request = self.client.get(&url).header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let user: GitHubUser = request
            .send()
            .await
            .with_context(|| format!("GitHub request for '{}' failed", username))?
            .error_for_status()
            .with_context(|| format!("GitHub returned an error for '{}'", username))?
            .json()
            .await
            .with_context(|| format!("Invalid GitHub user payload for '{}'", username))?;

        debug!("GitHub user {} has {:?} followers", username, user.followers);
        Ok(user.followers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: String, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(base_url, token.map(str::to_string), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_follower_count_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"login": "octocat", "followers": 4242}"#)
            .create_async()
            .await;

        let count = client(server.url(), Some("secret")).follower_count("octocat").await.unwrap();

        mock.assert_async().await;
        assert_eq!(count, Some(4242));
    }

    #[tokio::test]
    async fn test_missing_followers_field_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/ghost")
            .with_status(200)
            .with_body(r#"{"login": "ghost"}"#)
            .create_async()
            .await;

        let count = client(server.url(), None).follower_count("ghost").await.unwrap();
        assert_eq!(count, None);
    }

    #[tokio::test]
    async fn test_not_found_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/nobody")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let err = client(format!("{}/", server.url()), None)
            .follower_count("nobody")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GitHub returned an error for 'nobody'"));
    }
}
