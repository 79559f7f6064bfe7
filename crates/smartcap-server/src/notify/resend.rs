use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use smartcap_core::{
    error::NotificationError,
    notify::{LeadNotification, Notifier},
};

use super::is_valid_email;

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sends lead notifications through the Resend HTTP API.
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: String,
}

#[derive(Debug, Serialize)]
struct SendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    text: String,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String, to: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            endpoint: RESEND_ENDPOINT.to_string(),
            api_key,
            from,
            to,
        })
    }

    /// Point the client at a different API base, e.g. a local stub.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, notification: &LeadNotification) -> Result<(), NotificationError> {
        if !is_valid_email(&self.to) {
            return Err(NotificationError::InvalidAddress(self.to.clone()));
        }
        let body = SendEmail {
            from: &self.from,
            to: [self.to.trim()],
            subject: notification.subject(),
            text: notification.text_body(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
