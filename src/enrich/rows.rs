use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{FollowerCounts, RecordSink};

/// A record linking someone's GitHub and Twitter/X profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gh_followers: Option<u64>,
}

impl ProfileRow {
    pub fn new(id: impl Into<String>, github_url: Option<&str>, twitter_url: Option<&str>) -> Self {
        Self {
            id: id.into(),
            github_url: github_url.map(str::to_string),
            twitter_url: twitter_url.map(str::to_string),
            x_followers: None,
            gh_followers: None,
        }
    }

    fn apply(&mut self, counts: &FollowerCounts) {
        if counts.x_followers.is_some() {
            self.x_followers = counts.x_followers;
        }
        if counts.gh_followers.is_some() {
            self.gh_followers = counts.gh_followers;
        }
    }
}

/// JSON-file backed row source and [`RecordSink`]
///
/// Updates are kept in memory until [`RowStore::flush`] writes every row,
/// with its counts merged in, back out as pretty JSON.
#[derive(Debug)]
pub struct RowStore {
    rows: Vec<ProfileRow>,
    updates: Mutex<HashMap<String, FollowerCounts>>,
}

impl RowStore {
    pub fn from_rows(rows: Vec<ProfileRow>) -> Self {
        Self {
            rows,
            updates: Mutex::new(HashMap::new()),
        }
    }

    /// Reads a JSON array of rows from `path`
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read rows from {}", path.display()))?;
        let rows: Vec<ProfileRow> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse rows in {}", path.display()))?;

        info!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(Self::from_rows(rows))
    }

    /// Rows that have no X follower count yet
    pub fn pending_rows(&self) -> Vec<ProfileRow> {
        self.rows
            .iter()
            .filter(|row| row.x_followers.is_none())
            .cloned()
            .collect()
    }

    /// Counts recorded for `id` since loading
    pub async fn counts_for(&self, id: &str) -> Option<FollowerCounts> {
        self.updates.lock().await.get(id).copied()
    }

    /// Every row with its recorded counts applied, in load order
    pub async fn merged_rows(&self) -> Vec<ProfileRow> {
        let updates = self.updates.lock().await;
        self.rows
            .iter()
            .cloned()
            .map(|mut row| {
                if let Some(counts) = updates.get(&row.id) {
                    row.apply(counts);
                }
                row
            })
            .collect()
    }

    /// Writes the merged rows to `path`
    pub async fn flush(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let rows = self.merged_rows().await;
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize rows")?;

        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write rows to {}", path.display()))?;

        info!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

impl RecordSink for RowStore {
    async fn update(&self, id: &str, counts: &FollowerCounts) -> Result<()> {
        if !self.rows.iter().any(|row| row.id == id) {
            bail!("Unknown row id: {}", id);
        }

        debug!("Recording {:?} for row {}", counts, id);
        let mut updates = self.updates.lock().await;
        let entry = updates.entry(id.to_string()).or_default();
        if counts.x_followers.is_some() {
            entry.x_followers = counts.x_followers;
        }
        if counts.gh_followers.is_some() {
            entry.gh_followers = counts.gh_followers;
        }
        Ok(())
    }
}
