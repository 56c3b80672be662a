//! Settings structures for the digest job

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Main settings structure, resolved once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub email: EmailSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with process environment variables
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored, except for numeric counts: those that are
    /// blank, unparsable or zero fall back to the built-in default.
    pub fn merge_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Search
        if let Some(val) = get("TAVILY_URL") {
            self.search.url = val;
        }
        if let Some(val) = get("TAVILY_API_KEY") {
            self.search.api_key = Some(val);
        }
        if let Some(val) = get("SEARCH_QUERY") {
            self.search.query = Some(val);
        }
        if let Some(val) = get("SEARCH_TOPIC") {
            self.search.topic = val;
        }
        if let Some(val) = get("SEARCH_DEPTH") {
            self.search.depth = val;
        }
        if let Some(val) = lookup("SEARCH_DAYS") {
            self.search.days = parse_count("SEARCH_DAYS", &val, DEFAULT_DAYS);
        }
        if let Some(val) = lookup("MAX_RESULTS") {
            self.search.max_results = parse_count("MAX_RESULTS", &val, DEFAULT_MAX_RESULTS);
        }
        if let Some(val) = get("INCLUDE_ANSWER") {
            self.search.include_answer = parse_flag("INCLUDE_ANSWER", &val);
        }

        // Email
        if let Some(val) = get("RESEND_URL") {
            self.email.url = val;
        }
        if let Some(val) = get("RESEND_API_KEY") {
            self.email.api_key = Some(val);
        }
        if let Some(val) = get("EMAIL_FROM") {
            self.email.from = Some(val);
        }
        if let Some(val) = get("EMAIL_TO") {
            self.email.to = Some(val);
        }
        if let Some(val) = get("EMAIL_SUBJECT") {
            self.email.subject = Some(val);
        }
        if let Some(val) = get("DIGEST_ESCAPE_HTML") {
            self.email.escape_html = parse_flag("DIGEST_ESCAPE_HTML", &val);
        }

        // Outgoing
        if let Some(val) = get("DIGEST_REQUEST_TIMEOUT") {
            match val.trim().parse::<f64>() {
                Ok(secs) if timeout_duration(secs).is_some() => {
                    self.outgoing.request_timeout = Some(secs)
                }
                _ => warn!("Ignoring invalid DIGEST_REQUEST_TIMEOUT value: {}", val),
            }
        }
    }

    /// Check that every required setting is present and endpoints parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("TAVILY_API_KEY", &self.search.api_key)?;
        require("SEARCH_QUERY", &self.search.query)?;
        require("RESEND_API_KEY", &self.email.api_key)?;
        require("EMAIL_FROM", &self.email.from)?;
        require("EMAIL_TO", &self.email.to)?;
        require("EMAIL_SUBJECT", &self.email.subject)?;

        check_url("TAVILY_URL", &self.search.url)?;
        check_url("RESEND_URL", &self.email.url)?;

        if let Some(secs) = self.outgoing.request_timeout {
            if timeout_duration(secs).is_none() {
                return Err(ConfigError::InvalidTimeout(secs));
            }
        }

        Ok(())
    }
}

pub const DEFAULT_SEARCH_URL: &str = "https://api.tavily.com/search";
pub const DEFAULT_EMAIL_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_DAYS: u32 = 7;
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Search endpoint
    pub url: String,
    /// Provider API key (required)
    pub api_key: Option<String>,
    /// Search query (required)
    pub query: Option<String>,
    /// Topic category, e.g. "news" or "general"
    pub topic: String,
    /// Search depth, "basic" or "advanced"
    pub depth: String,
    /// Recency window in days
    pub days: u32,
    /// Maximum number of results requested
    pub max_results: u32,
    /// Ask the provider for a generated answer
    pub include_answer: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            api_key: None,
            query: None,
            topic: "news".to_string(),
            depth: "advanced".to_string(),
            days: DEFAULT_DAYS,
            max_results: DEFAULT_MAX_RESULTS,
            include_answer: false,
        }
    }
}

impl SearchSettings {
    /// The configured query, or an empty string before validation
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

/// Email provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Email endpoint
    pub url: String,
    /// Provider API key (required)
    pub api_key: Option<String>,
    /// Sender address (required)
    pub from: Option<String>,
    /// Recipient address (required)
    pub to: Option<String>,
    /// Subject line (required)
    pub subject: Option<String>,
    /// HTML-escape the query and URLs in the rendered body
    pub escape_html: bool,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_EMAIL_URL.to_string(),
            api_key: None,
            from: None,
            to: None,
            subject: None,
            escape_html: false,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = wait indefinitely)
    pub request_timeout: Option<f64>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            user_agent: format!("news-digest/{}", crate::VERSION),
        }
    }
}

/// A usable request timeout: finite, positive and representable
pub fn timeout_duration(secs: f64) -> Option<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

fn parse_count(key: &str, value: &str, default: u32) -> u32 {
    let value = value.trim();
    if value.is_empty() {
        return default;
    }
    match value.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!("Invalid {} value {:?}, using default {}", key, value, default);
            default
        }
    }
}

fn parse_flag(key: &str, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => {
            warn!("Invalid {} value {:?}, using false", key, value);
            false
        }
    }
}

fn require(key: &'static str, value: &Option<String>) -> Result<(), ConfigError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        })
}
