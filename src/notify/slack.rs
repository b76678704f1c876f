// Slack Notifier - chat.postMessage integration

use crate::Result;
use crate::config::SlackConfig;
use crate::error::DeadlineError;
use crate::notify::Notifier;
use async_trait::async_trait;
use std::time::Duration;

/// Posts notifications to a Slack channel with a bot token
pub struct SlackNotifier {
    config: SlackConfig,
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Create new Slack notifier
    pub fn new(config: SlackConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeadlineError::Delivery(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Form fields for one message
    fn form_fields<'a>(
        &'a self,
        token: &'a str,
        channel: &'a str,
        message: &'a str,
    ) -> [(&'static str, &'a str); 5] {
        [
            ("token", token),
            ("channel", channel),
            ("username", self.config.username.as_str()),
            ("text", message),
            ("icon_emoji", self.config.icon_emoji.as_str()),
        ]
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let Some((token, channel)) = self.config.credentials() else {
            tracing::debug!("Slack not configured, skipping notification");
            return Ok(());
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .form(&self.form_fields(token, channel, message))
            .send()
            .await
            .map_err(|e| DeadlineError::Delivery(format!("Slack request failed: {}", e)))?;

        // The response is not inspected further; Slack reports most errors with 200 anyway.
        if !response.status().is_success() {
            tracing::warn!("Slack returned status {} for channel {}", response.status(), channel);
        }

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "slack"
    }

    fn is_configured(&self) -> bool {
        self.config.credentials().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config(server: &MockServer) -> SlackConfig {
        SlackConfig {
            token: Some("xoxb-test".to_string()),
            channel: Some("certs".to_string()),
            api_url: format!("{}/api/chat.postMessage", server.uri()),
            ..SlackConfig::default()
        }
    }

    #[tokio::test]
    async fn test_posts_form_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat.postMessage"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("token=xoxb-test"))
            .and(body_string_contains("channel=certs"))
            .and(body_string_contains("username=SSL+Deadline+Checker"))
            .and(body_string_contains("icon_emoji=%3Asquirrel%3A"))
            .and(body_string_contains("text=hello+world"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new(create_test_config(&server)).unwrap();
        assert!(notifier.is_configured());
        notifier.notify("hello world").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = SlackConfig {
            token: None,
            ..create_test_config(&server)
        };
        let notifier = SlackNotifier::new(config).unwrap();

        assert!(!notifier.is_configured());
        notifier.notify("should not be sent").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_channel_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = SlackConfig {
            channel: None,
            ..create_test_config(&server)
        };
        SlackNotifier::new(config)
            .unwrap()
            .notify("should not be sent")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new(create_test_config(&server)).unwrap();
        assert!(notifier.notify("server is unhappy").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_delivery_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = SlackConfig {
            token: Some("xoxb-test".to_string()),
            channel: Some("certs".to_string()),
            api_url: format!("http://{}/api/chat.postMessage", addr),
            ..SlackConfig::default()
        };

        let err = SlackNotifier::new(config)
            .unwrap()
            .notify("nobody listening")
            .await
            .unwrap_err();
        assert!(matches!(err, DeadlineError::Delivery(_)));
    }
}
