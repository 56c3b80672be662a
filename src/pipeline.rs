//! Digest orchestration: search, then email

use crate::config::Settings;
use crate::error::DigestError;
use crate::network::HttpClient;
use crate::notify::{compose, Notifier, ResendClient};
use crate::search::{SearchProvider, TavilyClient};
use std::fmt;
use tracing::{debug, error, info};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Searching,
    Searched,
    Emailing,
    Done,
    Failed,
}

impl Stage {
    /// `Done` and `Failed` end a run
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::Searching => "searching",
            Stage::Searched => "searched",
            Stage::Emailing => "emailing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub result_count: usize,
    pub stage: Stage,
}

/// One search followed by one email
pub struct Pipeline<S, N> {
    settings: Settings,
    search: S,
    notifier: N,
    stage: Stage,
}

impl Pipeline<TavilyClient, ResendClient> {
    /// Build the production pipeline from validated settings
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        Ok(Self::new(
            settings,
            TavilyClient::new(client.clone()),
            ResendClient::new(client),
        ))
    }
}

impl<S: SearchProvider, N: Notifier> Pipeline<S, N> {
    pub fn new(settings: Settings, search: S, notifier: N) -> Self {
        Self {
            settings,
            search,
            notifier,
            stage: Stage::Start,
        }
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) {
        debug!("Pipeline {} -> {}", self.stage, next);
        self.stage = next;
    }

    /// Run the pipeline once. The email step only starts after the search
    /// step has succeeded.
    pub async fn run(&mut self) -> Result<RunReport, DigestError> {
        match self.run_steps().await {
            Ok(count) => Ok(RunReport {
                result_count: count,
                stage: self.stage,
            }),
            Err(e) => {
                self.advance(Stage::Failed);
                Err(e)
            }
        }
    }

    async fn run_steps(&mut self) -> Result<usize, DigestError> {
        self.advance(Stage::Searching);
        let results = self.search.search(&self.settings.search).await?;
        self.advance(Stage::Searched);
        info!("Found {} results", results.len());

        self.advance(Stage::Emailing);
        let message = compose(&self.settings.email, self.settings.search.query(), &results)
            .map_err(|e| {
                error!("Failed to render digest: {:#}", e);
                DigestError::EmailFailed
            })?;
        self.notifier.send(&self.settings.email, &message).await?;
        self.advance(Stage::Done);
        info!("Email sent successfully");

        Ok(results.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmailSettings, SearchSettings};
    use crate::notify::EmailMessage;
    use crate::search::SearchResultSet;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct FakeSearch(Option<Vec<&'static str>>);

    #[async_trait]
    impl SearchProvider for FakeSearch {
        fn name(&self) -> &str {
            "fake"
        }

        async fn search(&self, _: &SearchSettings) -> Result<SearchResultSet, DigestError> {
            match &self.0 {
                Some(urls) => Ok(SearchResultSet::new(
                    urls.iter().map(|u| u.to_string()).collect(),
                )),
                None => Err(DigestError::SearchFailed),
            }
        }
    }

    #[derive(Clone, Default)]
    struct FakeNotifier {
        sent: Arc<Mutex<Vec<EmailMessage>>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        fn name(&self) -> &str {
            "fake"
        }

        async fn send(&self, _: &EmailSettings, message: &EmailMessage) -> Result<(), DigestError> {
            self.sent.lock().unwrap().push(message.clone());
            if self.fail {
                Err(DigestError::EmailFailed)
            } else {
                Ok(())
            }
        }
    }

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.search.query = Some("rockets".to_string());
        settings.email.subject = Some("Digest".to_string());
        settings
    }

    #[tokio::test]
    async fn test_run_success() {
        let notifier = FakeNotifier::default();
        let mut pipeline = Pipeline::new(
            settings(),
            FakeSearch(Some(vec!["https://a.example/1", "https://b.example/2"])),
            notifier.clone(),
        );
        assert_eq!(pipeline.stage(), Stage::Start);

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.result_count, 2);
        assert_eq!(report.stage, Stage::Done);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Digest");
        assert!(sent[0].html.contains("Found 2 results:"));
    }

    #[tokio::test]
    async fn test_search_failure_skips_email() {
        let notifier = FakeNotifier::default();
        let mut pipeline = Pipeline::new(settings(), FakeSearch(None), notifier.clone());

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, DigestError::SearchFailed));
        assert_eq!(pipeline.stage(), Stage::Failed);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_email_failure_fails_run() {
        let notifier = FakeNotifier {
            fail: true,
            ..Default::default()
        };
        let mut pipeline = Pipeline::new(settings(), FakeSearch(Some(vec![])), notifier.clone());

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, DigestError::EmailFailed));
        assert_eq!(err.exit_code(), 1);
        assert!(pipeline.stage().is_terminal());
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Failed.is_terminal());
        assert!(!Stage::Searched.is_terminal());
    }
}
