//! news-digest: search a news API for a topic and email the result links
//!
//! A single run performs one search request followed by one email request.
//! Scheduling is left to whatever invokes the binary (cron, a CI schedule,
//! a serverless timer).

pub mod config;
pub mod error;
pub mod network;
pub mod notify;
pub mod pipeline;
pub mod search;

pub use config::Settings;
pub use error::{ConfigError, DigestError};
pub use pipeline::{Pipeline, RunReport, Stage};
pub use search::SearchResultSet;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
