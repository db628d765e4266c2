//! Domainer Common - feed, cache and advisory plumbing for Domainer
//!
//! Downloads the `.se` bardate feed, keeps a sorted local copy and answers
//! "which domains free up on this date" queries.

pub mod advisory;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod parser;
pub mod record;
pub mod source;

pub use advisory::{
    analyze_domains, AdvisoryBackend, AdvisoryError, OpenAiAdvisoryClient, UnavailableBackend,
};
pub use cache::CacheFile;
pub use config::{AdvisoryConfig, DomainerConfig};
pub use error::DomainerError;
pub use fetch::{FeedFetcher, FetchError, HttpFeedFetcher, UnavailableFetcher};
pub use filter::available_on;
pub use record::{parse_date, DomainRecord};
pub use source::{DataSource, Dataset};
