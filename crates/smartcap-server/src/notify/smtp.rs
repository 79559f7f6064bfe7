use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

use smartcap_core::{
    config::SmtpConfig,
    error::NotificationError,
    notify::{LeadNotification, Notifier},
};

use super::is_valid_email;

/// Sends lead notifications over SMTP.
///
/// Remote relays use STARTTLS. A relay on the local host is spoken to in
/// plain text, which suits a sidecar MTA.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

fn is_local_host(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

impl SmtpNotifier {
    pub fn new(smtp: &SmtpConfig, from: String, to: String) -> anyhow::Result<Self> {
        let builder = if is_local_host(&smtp.host) {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp.host.as_str())
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
        };
        let mut builder = builder
            .port(smtp.port)
            .timeout(Some(Duration::from_secs(5)));
        if let (Some(user), Some(pass)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Ok(Self {
            mailer: builder.build(),
            from,
            to,
        })
    }

    fn build_message(&self, notification: &LeadNotification) -> Result<Message, NotificationError> {
        if !is_valid_email(&self.to) {
            return Err(NotificationError::InvalidAddress(self.to.clone()));
        }
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(self.from.clone()))?;
        let to: Mailbox = self
            .to
            .trim()
            .parse()
            .map_err(|_| NotificationError::InvalidAddress(self.to.clone()))?;
        Message::builder()
            .from(from)
            .to(to)
            .subject(notification.subject())
            .body(notification.text_body())
            .map_err(|e| NotificationError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notification: &LeadNotification) -> Result<(), NotificationError> {
        let message = self.build_message(notification)?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        Ok(())
    }
}
