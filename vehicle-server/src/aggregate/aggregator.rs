//! Fan-out over the feeds a request needs, fan-in of normalized vehicles.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::OptionFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{FeedGroup, NormalizedVehicle, RouteToken};
use crate::feeds::{
    BulkTransitPayload, FeedBackend, FeedClient, FeedError, FeedPayload, RailPayload, SubwayDump,
};
use crate::lines::LineTable;
use crate::normalize::{normalize_bulk, normalize_rail, normalize_subway};
use crate::textfeed;

use super::config::AggregatorConfig;

/// Error from aggregation.
///
/// Upstream failures are absorbed, so the only error is a request that
/// could never be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// The request names no routes
    #[error("invalid request: {0}")]
    Validation(String),
}

/// Aggregator over the production feed backends.
pub type LiveAggregator = Aggregator<
    FeedBackend<BulkTransitPayload>,
    FeedBackend<RailPayload>,
    FeedBackend<SubwayDump>,
>;

/// Merges vehicles for a set of route tokens across the three feeds.
///
/// Each feed is fetched at most once per call, and only if some token
/// needs it. Fetches run concurrently under a shared cancellation token and
/// a per-feed deadline. A feed that fails, times out or is cancelled
/// contributes no vehicles; the others are unaffected.
pub struct Aggregator<B, R, S> {
    bulk: B,
    rail: R,
    subway: S,
    lines: Arc<LineTable>,
    config: AggregatorConfig,
}

/// Tokens partitioned by the feed that serves them, in request order.
#[derive(Debug, Default)]
struct Partition<'a> {
    bulk: Vec<&'a RouteToken>,
    rail: Vec<&'a RouteToken>,
    subway: Vec<&'a RouteToken>,
}

impl<B, R, S> Aggregator<B, R, S>
where
    B: FeedClient<Payload = BulkTransitPayload> + Sync,
    R: FeedClient<Payload = RailPayload> + Sync,
    S: FeedClient<Payload = SubwayDump> + Sync,
{
    pub fn new(bulk: B, rail: R, subway: S, lines: Arc<LineTable>, config: AggregatorConfig) -> Self {
        Self {
            bulk,
            rail,
            subway,
            lines,
            config,
        }
    }

    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Vehicles for every requested route, bus and trolley first, then
    /// rail, then subway. Within a group, output follows request order.
    ///
    /// Blank tokens are ignored and repeated tokens count once. Returns a
    /// validation error, without touching any feed, when nothing is left.
    /// Cancelling `cancel` abandons in-flight fetches and returns whatever
    /// the finished ones produced.
    #[tracing::instrument(skip_all, fields(routes = tokens.len()))]
    pub async fn aggregate(
        &self,
        tokens: &[RouteToken],
        cancel: &CancellationToken,
    ) -> Result<Vec<NormalizedVehicle>, AggregateError> {
        let partition = self.partition(tokens)?;
        let timeout = self.config.feed_timeout;

        let bulk: OptionFuture<_> = (!partition.bulk.is_empty())
            .then(|| guarded_fetch(&self.bulk, timeout, cancel))
            .into();
        let rail: OptionFuture<_> = (!partition.rail.is_empty())
            .then(|| guarded_fetch(&self.rail, timeout, cancel))
            .into();
        let subway: OptionFuture<_> = (!partition.subway.is_empty())
            .then(|| guarded_fetch(&self.subway, timeout, cancel))
            .into();

        let (bulk, rail, subway) = tokio::join!(bulk, rail, subway);

        let mut vehicles = Vec::new();

        if let Some(payload) = bulk.flatten() {
            for token in &partition.bulk {
                vehicles.extend(normalize_bulk(&payload, token, &self.lines));
            }
        }

        if let Some(trains) = rail.flatten() {
            for token in &partition.rail {
                vehicles.extend(normalize_rail(trains.as_slice(), token, &self.lines));
            }
        }

        if let Some(dump) = subway.flatten() {
            let entities = textfeed::parse(dump.as_str());
            for token in &partition.subway {
                vehicles.extend(normalize_subway(&entities, token));
            }
        }

        info!(vehicles = vehicles.len(), "aggregated");
        Ok(vehicles)
    }

    /// Validate, deduplicate and split tokens by feed.
    fn partition<'a>(&self, tokens: &'a [RouteToken]) -> Result<Partition<'a>, AggregateError> {
        let mut seen = HashSet::new();
        let mut partition = Partition::default();

        for token in tokens {
            if token.is_blank() || !seen.insert(self.dedupe_key(token)) {
                continue;
            }
            let group = match self.lines.classify(token).group() {
                FeedGroup::BulkTransit => &mut partition.bulk,
                FeedGroup::Rail => &mut partition.rail,
                FeedGroup::Subway => &mut partition.subway,
            };
            group.push(token);
        }

        if seen.is_empty() {
            return Err(AggregateError::Validation(
                "at least one route is required".to_string(),
            ));
        }

        Ok(partition)
    }

    /// Rail and subway tokens dedupe on their canonical line name, so
    /// case variants of one line are one request.
    fn dedupe_key<'s>(&'s self, token: &'s RouteToken) -> &'s str {
        let raw = token.as_str().trim();
        self.lines
            .rail_line(raw)
            .or_else(|| self.lines.subway_line(raw))
            .unwrap_or(raw)
    }
}

/// Fetch one feed under a deadline and a cancellation token.
///
/// Failures are logged and become `None`.
async fn guarded_fetch<C>(
    client: &C,
    timeout: std::time::Duration,
    cancel: &CancellationToken,
) -> Option<C::Payload>
where
    C: FeedClient,
    C::Payload: FeedPayload,
{
    let group = <C::Payload as FeedPayload>::GROUP;

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FeedError::Cancelled),
        fetched = tokio::time::timeout(timeout, client.fetch()) => {
            fetched.unwrap_or(Err(FeedError::Timeout { after: timeout }))
        }
    };

    match result {
        Ok(payload) => Some(payload),
        Err(FeedError::Cancelled) => {
            debug!(feed = %group, "fetch cancelled");
            None
        }
        Err(e) => {
            warn!(feed = %group, error = %e, body = e.body(), "feed unavailable, skipping");
            None
        }
    }
}
