//! Wire types for the search provider and the extracted result set

use crate::config::SearchSettings;
use serde::{Deserialize, Serialize, Serializer};
use tracing::warn;

/// JSON body sent to the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub api_key: &'a str,
    pub query: &'a str,
    pub search_depth: &'a str,
    pub topic: &'a str,
    pub days: u32,
    pub max_results: u32,
    /// Sent as the string "true" or "false"
    #[serde(serialize_with = "bool_as_string")]
    pub include_answer: bool,
}

impl<'a> SearchRequest<'a> {
    /// Build the request body from settings
    pub fn from_settings(settings: &'a SearchSettings) -> Self {
        Self {
            api_key: settings.api_key.as_deref().unwrap_or_default(),
            query: settings.query(),
            search_depth: &settings.depth,
            topic: &settings.topic,
            days: settings.days,
            max_results: settings.max_results,
            include_answer: settings.include_answer,
        }
    }
}

fn bool_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Response from the search endpoint. `query` and `response_time` are only
/// logged; `answer` feeds the optional answer paragraph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

/// A single element of the `results` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub url: Option<String>,
}

/// Ordered URLs extracted from a search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResultSet {
    pub urls: Vec<String>,
    /// Generated answer, when one was requested and returned
    pub answer: Option<String>,
}

impl SearchResultSet {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls, answer: None }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl From<SearchResponse> for SearchResultSet {
    fn from(response: SearchResponse) -> Self {
        let hits = match response.results {
            Some(hits) => hits,
            None => {
                return Self {
                    urls: Vec::new(),
                    answer: response.answer,
                }
            }
        };

        let total = hits.len();
        let urls: Vec<String> = hits.into_iter().filter_map(|hit| hit.url).collect();

        let missing = total - urls.len();
        if missing > 0 {
            warn!("Skipped {} search results without a url", missing);
        }

        Self {
            urls,
            answer: response.answer,
        }
    }
}
