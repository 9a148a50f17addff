pub mod error;
pub mod fetch;
pub mod parse;
pub mod pipeline;
pub mod store;

mod transform;
mod validate;


pub use error::{FeedError, ImportError};
pub use fetch::{validate_feed_url, FeedSource, HttpFeedSource};
pub use parse::RawRow;
pub use pipeline::{run_import, ImportReport};
pub use store::ListingStore;
