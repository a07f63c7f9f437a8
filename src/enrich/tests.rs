#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::enrich::{enrich_rows, FollowerCounts, FollowerLookup, ProfileRow, RecordSink, RowStore};

    /// Canned follower counts keyed by username; unknown users fail
    struct StaticLookup {
        counts: HashMap<&'static str, Option<u64>>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StaticLookup {
        fn new(counts: &[(&'static str, Option<u64>)]) -> Self {
            Self {
                counts: counts.iter().copied().collect(),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FollowerLookup for StaticLookup {
        async fn follower_count(&self, username: &str) -> Result<Option<u64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.counts.get(username) {
                Some(count) => Ok(*count),
                None => bail!("no such user: {}", username),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        updates: Mutex<Vec<(String, FollowerCounts)>>,
    }

    impl RecordSink for RecordingSink {
        async fn update(&self, id: &str, counts: &FollowerCounts) -> Result<()> {
            self.updates.lock().unwrap().push((id.to_string(), *counts));
            Ok(())
        }
    }

    fn row(id: &str, github: Option<&str>, twitter: Option<&str>) -> ProfileRow {
        ProfileRow::new(id, github, twitter)
    }

    #[tokio::test]
    async fn test_enrich_rows_records_counts() {
        let github = StaticLookup::new(&[("octocat", Some(100))]);
        let twitter = StaticLookup::new(&[("fiatlucy", Some(50))]);
        let sink = RecordingSink::default();

        let rows = vec![row("1", Some("https://github.com/Octocat"), Some("https://x.com/fiatlucy"))];
        let enriched = enrich_rows(rows, &github, &twitter, &sink, 4).await;

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].id, "1");
        assert_eq!(enriched[0].github_username, "octocat");
        assert_eq!(enriched[0].twitter_username, "fiatlucy");
        assert_eq!(
            enriched[0].counts,
            FollowerCounts { x_followers: Some(50), gh_followers: Some(100) }
        );

        let updates = sink.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "1");
    }

    #[tokio::test]
    async fn test_rows_without_both_usernames_are_skipped() {
        let github = StaticLookup::new(&[("octocat", Some(1))]);
        let twitter = StaticLookup::new(&[("fiatlucy", Some(1))]);
        let sink = RecordingSink::default();

        let rows = vec![
            row("no-twitter", Some("https://github.com/octocat"), None),
            row("no-github", None, Some("https://x.com/fiatlucy")),
            row("bad-github", Some("https://github.com/-invalid"), Some("https://x.com/fiatlucy")),
            row("not-twitter", Some("https://github.com/octocat"), Some("https://example.com/fiatlucy")),
        ];
        let enriched = enrich_rows(rows, &github, &twitter, &sink, 2).await;

        assert!(enriched.is_empty());
        assert!(sink.updates.lock().unwrap().is_empty());
        assert_eq!(github.calls.load(Ordering::SeqCst), 0);
        assert_eq!(twitter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failing_row_does_not_abort_others() {
        let github = StaticLookup::new(&[("octocat", Some(10)), ("torvalds", Some(20))]);
        let twitter = StaticLookup::new(&[("octocat", Some(5))]);
        let sink = RecordingSink::default();

        let rows = vec![
            row("ok", Some("github.com/octocat"), Some("x.com/octocat")),
            row("fails", Some("github.com/torvalds"), Some("x.com/unknown")),
        ];
        let enriched = enrich_rows(rows, &github, &twitter, &sink, 2).await;

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].id, "ok");
        assert_eq!(sink.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_x_followers_are_not_recorded() {
        let github = StaticLookup::new(&[("octocat", Some(0))]);
        let twitter = StaticLookup::new(&[("octocat", Some(0))]);
        let sink = RecordingSink::default();

        let rows = vec![row("1", Some("https://github.com/octocat"), Some("https://x.com/octocat"))];
        let enriched = enrich_rows(rows, &github, &twitter, &sink, 1).await;

        assert_eq!(
            enriched[0].counts,
            FollowerCounts { x_followers: None, gh_followers: Some(0) }
        );
    }

    #[tokio::test]
    async fn test_every_row_completes_with_bounded_concurrency() {
        let mut github = StaticLookup::new(&[("slow", Some(1)), ("fast", Some(2))]);
        github.delay = Duration::from_millis(1);
        let twitter = StaticLookup::new(&[("slow", Some(1)), ("fast", Some(2))]);
        let sink = RecordingSink::default();

        let rows: Vec<ProfileRow> = (0..8)
            .map(|i| {
                let name = if i % 2 == 0 { "slow" } else { "fast" };
                let github_url = format!("https://github.com/{}", name);
                let twitter_url = format!("https://x.com/{}", name);
                row(&i.to_string(), Some(github_url.as_str()), Some(twitter_url.as_str()))
            })
            .collect();

        let enriched = enrich_rows(rows, &github, &twitter, &sink, 3).await;

        let mut ids: Vec<String> = enriched.into_iter().map(|row| row.id).collect();
        ids.sort();
        assert_eq!(ids, (0..8).map(|i| i.to_string()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_row_store_as_sink() {
        let github = StaticLookup::new(&[("octocat", Some(42))]);
        let twitter = StaticLookup::new(&[("octocat", Some(7))]);
        let store = RowStore::from_rows(vec![row(
            "1",
            Some("https://github.com/octocat"),
            Some("https://twitter.com/octocat"),
        )]);

        let rows = store.pending_rows();
        let enriched = enrich_rows(rows, &github, &twitter, &store, 0).await;

        assert_eq!(enriched.len(), 1);
        assert_eq!(
            store.counts_for("1").await,
            Some(FollowerCounts { x_followers: Some(7), gh_followers: Some(42) })
        );
    }
}
