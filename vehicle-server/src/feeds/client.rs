//! HTTP client shared by the three upstream feeds.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::domain::FeedGroup;

use super::error::FeedError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A feed response body, decoded into its raw upstream shape.
pub trait FeedPayload: Sized + Send {
    /// The upstream this payload is fetched from.
    const GROUP: FeedGroup;

    /// Decode a response body.
    fn decode(body: String) -> Result<Self, FeedError>;
}

/// A source of one upstream feed.
///
/// Each call to `fetch` makes a single upstream request and returns the
/// whole feed. Implementations do not retry; failures are returned, never
/// panicked.
pub trait FeedClient {
    type Payload: Send;

    fn fetch(&self) -> impl Future<Output = Result<Self::Payload, FeedError>> + Send;
}

/// Configuration for an HTTP feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Full URL of the feed endpoint
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for one upstream feed.
///
/// `P` fixes the upstream contract: the same client type serves the bulk
/// transit, rail and subway feeds with different payload decoders.
pub struct HttpFeedClient<P> {
    http: reqwest::Client,
    url: String,
    payload: PhantomData<fn() -> P>,
}

impl<P: FeedPayload> HttpFeedClient<P> {
    /// Create a new client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/html;q=0.9, text/plain;q=0.8"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
            payload: PhantomData,
        })
    }

    /// The endpoint this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<P: FeedPayload> FeedClient for HttpFeedClient<P> {
    type Payload = P;

    async fn fetch(&self) -> Result<P, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        P::decode(body)
    }
}

impl<P> Clone for HttpFeedClient<P> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            url: self.url.clone(),
            payload: PhantomData,
        }
    }
}

impl<P: FeedPayload> fmt::Debug for HttpFeedClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFeedClient")
            .field("group", &P::GROUP)
            .field("url", &self.url)
            .finish()
    }
}
