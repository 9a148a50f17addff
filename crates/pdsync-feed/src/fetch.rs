//! Feed URL validation and HTTP retrieval.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FeedError;

/// Parses and validates a feed URL before any network access happens.
///
/// Only absolute HTTPS URLs are accepted. The feed carries listing data that
/// ends up in the store verbatim, so a plaintext transport is treated as a
/// configuration error, not something to silently allow.
///
/// # Errors
///
/// Returns [`FeedError::InvalidFeedUrl`] if the string does not parse as a
/// URL or its scheme is not `https`.
pub fn validate_feed_url(feed_url: &str) -> Result<Url, FeedError> {
    let url = Url::parse(feed_url).map_err(|e| FeedError::InvalidFeedUrl {
        url: feed_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "https" {
        return Err(FeedError::InvalidFeedUrl {
            url: feed_url.to_string(),
            reason: format!("scheme must be https, got {}", url.scheme()),
        });
    }

    Ok(url)
}

/// Capability to retrieve the raw feed text for a validated URL.
///
/// The pipeline treats a fetch failure as an all-or-nothing gate: the error
/// propagates to the caller and no rows are processed.
pub trait FeedSource {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FeedError>> + Send;
}

/// [`FeedSource`] backed by a real HTTP client.
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    /// Creates an `HttpFeedSource` with the given request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    /// Fetches the feed body as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Unavailable`] — DNS, connection, or body-read failure.
    /// - [`FeedError::UnexpectedStatus`] — any non-2xx response.
    async fn fetch(&self, url: &Url) -> Result<String, FeedError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FeedError::Unavailable {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| FeedError::Unavailable {
            url: url.to_string(),
            source: e,
        })
    }
}
