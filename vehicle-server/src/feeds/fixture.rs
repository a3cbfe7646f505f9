//! File-backed feeds for running without upstream access.
//!
//! A fixture directory holds one file per feed (`bulk.json`, `rail.json`,
//! `subway.txt`). Files are re-read on every fetch, so they can be edited
//! while the server runs.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::domain::FeedGroup;

use super::client::{FeedClient, FeedPayload, HttpFeedClient};
use super::error::FeedError;

/// A feed served from a file on disk.
pub struct FixtureFeed<P> {
    path: PathBuf,
    payload: PhantomData<fn() -> P>,
}

impl<P: FeedPayload> FixtureFeed<P> {
    /// Serve the feed from an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            payload: PhantomData,
        }
    }

    /// Serve the feed from its conventional file inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(fixture_file_name(P::GROUP)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<P: FeedPayload> FeedClient for FixtureFeed<P> {
    type Payload = P;

    async fn fetch(&self) -> Result<P, FeedError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::Fixture {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        P::decode(body)
    }
}

/// File name a feed is stored under in a fixture directory.
pub fn fixture_file_name(group: FeedGroup) -> &'static str {
    match group {
        FeedGroup::BulkTransit => "bulk.json",
        FeedGroup::Rail => "rail.json",
        FeedGroup::Subway => "subway.txt",
    }
}

/// Where a feed's data comes from: upstream over HTTP, or a fixture file.
pub enum FeedBackend<P> {
    Http(HttpFeedClient<P>),
    Fixture(FixtureFeed<P>),
}

impl<P: FeedPayload> FeedClient for FeedBackend<P> {
    type Payload = P;

    async fn fetch(&self) -> Result<P, FeedError> {
        match self {
            FeedBackend::Http(client) => client.fetch().await,
            FeedBackend::Fixture(feed) => feed.fetch().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::{BulkTransitPayload, RailPayload, SubwayDump};
    use tempfile::tempdir;

    #[test]
    fn conventional_file_names() {
        let feed = FixtureFeed::<RailPayload>::in_dir("/data/fixtures");
        assert_eq!(feed.path(), Path::new("/data/fixtures/rail.json"));
        assert_eq!(fixture_file_name(FeedGroup::BulkTransit), "bulk.json");
        assert_eq!(fixture_file_name(FeedGroup::Subway), "subway.txt");
    }

    #[tokio::test]
    async fn serves_file_contents() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("bulk.json"),
            r#"{"routes":[{"17":[{"lat":"39.9","lng":"-75.1","VehicleID":"1"}]}]}"#,
        )
        .unwrap();

        let feed = FeedBackend::Fixture(FixtureFeed::<BulkTransitPayload>::in_dir(dir.path()));
        let payload = feed.fetch().await.unwrap();
        assert_eq!(payload.vehicles_for("17").len(), 1);
    }

    #[tokio::test]
    async fn rereads_file_on_each_fetch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subway.txt");
        std::fs::write(&path, "first").unwrap();

        let feed = FixtureFeed::<SubwayDump>::new(&path);
        assert_eq!(feed.fetch().await.unwrap().as_str(), "first");

        std::fs::write(&path, "second").unwrap();
        assert_eq!(feed.fetch().await.unwrap().as_str(), "second");
    }

    #[tokio::test]
    async fn missing_file_is_fixture_error() {
        let dir = tempdir().unwrap();
        let feed = FixtureFeed::<RailPayload>::in_dir(dir.path());
        let err = feed.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Fixture { .. }));
    }

    #[tokio::test]
    async fn bundled_fixtures_decode() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data/fixtures");

        let bulk = FixtureFeed::<BulkTransitPayload>::in_dir(dir).fetch().await.unwrap();
        assert!(!bulk.vehicles_for("17").is_empty());

        let rail = FixtureFeed::<RailPayload>::in_dir(dir).fetch().await.unwrap();
        assert!(!rail.as_slice().is_empty());

        let subway = FixtureFeed::<SubwayDump>::in_dir(dir).fetch().await.unwrap();
        assert!(subway.as_str().contains("entity"));
    }
}
