//! Error types for the digest pipeline

use thiserror::Error;

/// Problems found while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid URL for {key}: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("Invalid request timeout: {0} seconds")]
    InvalidTimeout(f64),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure of a pipeline run.
///
/// The search and email variants carry no cause. The underlying error is
/// logged at the call site; callers only learn which step failed.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Failed to search for results")]
    SearchFailed,

    #[error("Failed to send email")]
    EmailFailed,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DigestError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}
