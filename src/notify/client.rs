//! Email provider client

use super::template::DigestTemplate;
use crate::config::EmailSettings;
use crate::error::DigestError;
use crate::network::HttpClient;
use crate::search::SearchResultSet;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

/// JSON body sent to the email endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Build the digest email: envelope from settings, body from the template
pub fn compose(
    settings: &EmailSettings,
    query: &str,
    results: &SearchResultSet,
) -> anyhow::Result<EmailMessage> {
    let html = DigestTemplate::new(settings.escape_html)?.render(query, results)?;

    Ok(EmailMessage {
        from: settings.from.clone().unwrap_or_default(),
        to: settings.to.clone().unwrap_or_default(),
        subject: settings.subject.clone().unwrap_or_default(),
        html,
    })
}

/// Something that can deliver a digest message
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notifier name, used in logs
    fn name(&self) -> &str;

    /// Deliver one message
    async fn send(&self, settings: &EmailSettings, message: &EmailMessage)
        -> Result<(), DigestError>;
}

/// Client for the Resend email API
#[derive(Clone)]
pub struct ResendClient {
    client: HttpClient,
}

impl ResendClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    async fn post(&self, settings: &EmailSettings, message: &EmailMessage) -> anyhow::Result<()> {
        let api_key = settings.api_key.as_deref().unwrap_or_default();
        let headers = [("Authorization", format!("Bearer {}", api_key))];

        let response = self
            .client
            .post_json(&settings.url, &headers, message)
            .await?
            .error_for_status()?;

        debug!("Email endpoint answered {}", response.status);
        Ok(())
    }
}

#[async_trait]
impl Notifier for ResendClient {
    fn name(&self) -> &str {
        "resend"
    }

    async fn send(
        &self,
        settings: &EmailSettings,
        message: &EmailMessage,
    ) -> Result<(), DigestError> {
        debug!(
            "Sending {:?} to {} via {}",
            message.subject,
            message.to,
            self.name()
        );

        self.post(settings, message).await.map_err(|e| {
            error!("Resend API error: {:#}", e);
            DigestError::EmailFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: &MockServer) -> EmailSettings {
        EmailSettings {
            url: format!("{}/emails", server.uri()),
            api_key: Some("re-key".to_string()),
            from: Some("digest@example.com".to_string()),
            to: Some("me@example.com".to_string()),
            subject: Some("Daily rockets".to_string()),
            escape_html: false,
        }
    }

    #[test]
    fn test_compose_copies_envelope() {
        let settings = EmailSettings {
            from: Some("a@example.com".to_string()),
            to: Some("b@example.com".to_string()),
            subject: Some("Hello".to_string()),
            ..Default::default()
        };
        let results = SearchResultSet::new(vec!["https://a.example/1".to_string()]);
        let message = compose(&settings, "rockets", &results).unwrap();

        assert_eq!(message.from, "a@example.com");
        assert_eq!(message.to, "b@example.com");
        assert_eq!(message.subject, "Hello");
        assert!(message.html.contains("Found 1 results:"));
    }

    #[tokio::test]
    async fn test_send_posts_with_bearer_auth() {
        let server = MockServer::start().await;
        let settings = settings(&server);
        let message = EmailMessage {
            from: "digest@example.com".to_string(),
            to: "me@example.com".to_string(),
            subject: "Daily rockets".to_string(),
            html: "<p>hi</p>".to_string(),
        };

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("Authorization", "Bearer re-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "from": "digest@example.com",
                "to": "me@example.com",
                "subject": "Daily rockets",
                "html": "<p>hi</p>",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "e-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResendClient::new(HttpClient::new().unwrap());
        tokio_test::assert_ok!(client.send(&settings, &message).await);
    }

    #[tokio::test]
    async fn test_send_failure_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid from"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResendClient::new(HttpClient::new().unwrap());
        let message = compose(&settings(&server), "rockets", &SearchResultSet::default()).unwrap();
        let err = client.send(&settings(&server), &message).await.unwrap_err();

        assert!(matches!(err, DigestError::EmailFailed));
        assert_eq!(err.to_string(), "Failed to send email");
    }
}
