use thiserror::Error;

/// Errors from URL validation and feed retrieval. All of these are fatal to
/// the import — no rows are processed and no listings are touched.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidFeedUrl { url: String, reason: String },

    #[error("feed unavailable at {url}: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Fatal errors from a full import run. Row-level defects are NOT errors —
/// they are collected into [`crate::ImportReport::invalid_rows`] instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("feed is not parseable CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("listing store rejected the batch: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}
