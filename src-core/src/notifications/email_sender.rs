use async_trait::async_trait;
use log::debug;
use serde_json::json;

use super::notifications_traits::EmailSenderTrait;
use crate::errors::{Error, Result};

/// Sends outbound messages through the platform's mail relay.
/// Templating and address resolution live behind the relay.
pub struct WebhookMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WebhookMailer {
    pub fn new(endpoint: String, api_key: String) -> Self {
        WebhookMailer {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl EmailSenderTrait for WebhookMailer {
    async fn send(&self, user_id: &str, subject: &str, body: &str) -> Result<()> {
        let payload = json!({
            "userId": user_id,
            "subject": subject,
            "body": body,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("mail relay request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ExternalService(format!(
                "mail relay returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Logs instead of sending; used in local development.
pub struct LogMailer;

#[async_trait]
impl EmailSenderTrait for LogMailer {
    async fn send(&self, user_id: &str, subject: &str, body: &str) -> Result<()> {
        debug!("Mail to {}: {}: {}", user_id, subject, body);
        Ok(())
    }
}
