//! Search provider client

use super::models::{SearchRequest, SearchResponse, SearchResultSet};
use crate::config::SearchSettings;
use crate::error::DigestError;
use crate::network::HttpClient;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, error};

/// Something that can turn search settings into a result set
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Perform one search
    async fn search(&self, settings: &SearchSettings) -> Result<SearchResultSet, DigestError>;
}

/// Client for the Tavily search API
#[derive(Clone)]
pub struct TavilyClient {
    client: HttpClient,
}

impl TavilyClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, settings: &SearchSettings) -> anyhow::Result<SearchResponse> {
        let body = SearchRequest::from_settings(settings);
        let response = self
            .client
            .post_json(&settings.url, &[], &body)
            .await?
            .error_for_status()?;

        response
            .json::<SearchResponse>()
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON: {}", e))
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, settings: &SearchSettings) -> Result<SearchResultSet, DigestError> {
        let start = Instant::now();

        debug!(
            "Searching {} for {:?} (topic={}, days={}, max_results={})",
            self.name(),
            settings.query(),
            settings.topic,
            settings.days,
            settings.max_results
        );

        match self.fetch(settings).await {
            Ok(response) => {
                if let Some(secs) = response.response_time {
                    debug!(
                        "Provider answered {:?} in {:.2}s",
                        response.query.as_deref().unwrap_or_default(),
                        secs
                    );
                }
                let results = SearchResultSet::from(response);
                debug!(
                    "Search returned {} urls in {:?}",
                    results.len(),
                    start.elapsed()
                );
                Ok(results)
            }
            Err(e) => {
                error!("Tavily API error: {:#}", e);
                Err(DigestError::SearchFailed)
            }
        }
    }
}
