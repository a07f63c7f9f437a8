//! Enriches profile rows with GitHub and X follower counts.

pub mod github;
pub mod rows;
pub mod twitter;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::platform::{get_github_username, get_twitter_username};

pub use github::GitHubClient;
pub use rows::{ProfileRow, RowStore};
pub use twitter::TwitterClient;

/// Rows processed concurrently when nothing else is configured
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Looks up the follower count of a username on one platform
///
/// `Ok(None)` means the platform answered but reported no count.
#[allow(async_fn_in_trait)]
pub trait FollowerLookup {
    async fn follower_count(&self, username: &str) -> Result<Option<u64>>;
}

/// Receives the follower counts found for a row
#[allow(async_fn_in_trait)]
pub trait RecordSink {
    async fn update(&self, id: &str, counts: &FollowerCounts) -> Result<()>;
}

/// Follower counts for one row; absent counts are left untouched downstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gh_followers: Option<u64>,
}

/// A row that was looked up and written to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRow {
    pub id: String,
    pub github_username: String,
    pub twitter_username: String,
    pub counts: FollowerCounts,
}

/// Looks up follower counts for every row and records them in `sink`
///
/// Rows without both a valid GitHub and Twitter/X profile URL are skipped.
/// A failing row is logged and dropped without affecting the others. At most
/// `concurrency` rows are in flight, and results come back in completion
/// order rather than input order.
///
/// # Arguments
/// * `rows` - Rows to enrich
/// * `github` - GitHub follower lookup
/// * `twitter` - X follower lookup
/// * `sink` - Destination for the counts
/// * `concurrency` - Maximum rows in flight (0 is treated as 1)
#[instrument(skip_all, fields(rows = rows.len(), concurrency = concurrency))]
pub async fn enrich_rows<G, T, S>(
    rows: Vec<ProfileRow>,
    github: &G,
    twitter: &T,
    sink: &S,
    concurrency: usize,
) -> Vec<EnrichedRow>
where
    G: FollowerLookup,
    T: FollowerLookup,
    S: RecordSink,
{
    let total = rows.len();

    let enriched: Vec<EnrichedRow> = stream::iter(rows)
        .map(|row| async move {
            let id = row.id.clone();
            match enrich_row(row, github, twitter, sink).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Failed to enrich row {}: {:#}", id, e);
                    None
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .filter_map(|result| async move { result })
        .collect()
        .await;

    info!("Enriched {} of {} rows", enriched.len(), total);
    enriched
}

/// Enriches one row; `Ok(None)` when the row lacks usable profile URLs
async fn enrich_row<G, T, S>(
    row: ProfileRow,
    github: &G,
    twitter: &T,
    sink: &S,
) -> Result<Option<EnrichedRow>>
where
    G: FollowerLookup,
    T: FollowerLookup,
    S: RecordSink,
{
    let github_username = row.github_url.as_deref().and_then(get_github_username);
    let twitter_username = row.twitter_url.as_deref().and_then(get_twitter_username);

    let (Some(github_username), Some(twitter_username)) = (github_username, twitter_username) else {
        warn!(
            "Skipping row {}: github_url={:?} twitter_url={:?}",
            row.id, row.github_url, row.twitter_url
        );
        return Ok(None);
    };

    debug!(
        "Looking up followers for {} (github={}, x={})",
        row.id, github_username, twitter_username
    );
    let (gh_followers, x_followers) = tokio::try_join!(
        github.follower_count(&github_username),
        twitter.follower_count(&twitter_username),
    )?;

    // Zero X counts are treated as absent
    let counts = FollowerCounts {
        x_followers: x_followers.filter(|count| *count > 0),
        gh_followers,
    };

    sink.update(&row.id, &counts)
        .await
        .with_context(|| format!("Failed to record follower counts for row {}", row.id))?;

    Ok(Some(EnrichedRow {
        id: row.id,
        github_username,
        twitter_username,
        counts,
    }))
}
