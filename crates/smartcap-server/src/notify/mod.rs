//! Lead notification transports and the fire-and-forget dispatcher.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use smartcap_core::{
    config::{NotificationConfig, NotificationTransport},
    notify::{LeadNotification, Notifier, NullNotifier},
};

pub mod resend;
pub mod smtp;

pub use resend::ResendNotifier;
pub use smtp::SmtpNotifier;

pub(crate) fn is_valid_email(target: &str) -> bool {
    let trimmed = target.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
}

/// Build the notifier selected by `config`.
///
/// A transport that fails to initialise is logged and replaced by
/// [`NullNotifier`]; notifications must never stop the server from starting.
pub fn build_notifier(config: &NotificationConfig) -> Arc<dyn Notifier> {
    match config.transport() {
        NotificationTransport::Resend { api_key, to } => {
            match ResendNotifier::new(api_key, config.from.clone(), to) {
                Ok(notifier) => {
                    info!("Lead notifications enabled via Resend");
                    Arc::new(notifier)
                }
                Err(e) => {
                    warn!(error = %e, "Resend client setup failed, notifications disabled");
                    Arc::new(NullNotifier)
                }
            }
        }
        NotificationTransport::Smtp { smtp, to } => {
            match SmtpNotifier::new(&smtp, config.from.clone(), to) {
                Ok(notifier) => {
                    info!(
                        host = %smtp.host,
                        port = smtp.port,
                        "Lead notifications enabled via SMTP"
                    );
                    Arc::new(notifier)
                }
                Err(e) => {
                    warn!(error = %e, "SMTP transport setup failed, notifications disabled");
                    Arc::new(NullNotifier)
                }
            }
        }
        NotificationTransport::Disabled => {
            info!("Lead notifications not configured");
            Arc::new(NullNotifier)
        }
    }
}

/// Send `notification` on a detached task.
///
/// Returns `None` without spawning when the notifier is disabled. The
/// request path drops the handle; the outcome is only logged.
pub fn dispatch(
    notifier: Arc<dyn Notifier>,
    notification: LeadNotification,
) -> Option<JoinHandle<()>> {
    if !notifier.is_enabled() {
        return None;
    }
    Some(tokio::spawn(async move {
        match notifier.notify(&notification).await {
            Ok(()) => info!(lead_id = notification.lead_id, "Lead notification sent"),
            Err(e) => warn!(
                lead_id = notification.lead_id,
                error = %e,
                "Lead notification failed"
            ),
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use smartcap_core::error::NotificationError;

    use super::*;

    struct CountingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _n: &LeadNotification) -> Result<(), NotificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotificationError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn notification() -> LeadNotification {
        LeadNotification {
            lead_id: 1,
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            ab_variant: None,
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("ops@smartcap.example"));
        assert!(!is_valid_email("ops"));
        assert!(!is_valid_email("@smartcap.example"));
        assert!(!is_valid_email("ops@localhost"));
    }

    #[tokio::test]
    async fn disabled_notifier_is_never_spawned() {
        assert!(dispatch(Arc::new(NullNotifier), notification()).is_none());
    }

    #[tokio::test]
    async fn failure_is_contained_in_the_task() {
        let notifier = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let handle = dispatch(notifier.clone(), notification()).expect("spawned");
        handle.await.expect("task completes without panicking");
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unconfigured_transport_builds_null_notifier() {
        let notifier = build_notifier(&NotificationConfig::default());
        assert!(!notifier.is_enabled());
    }
}
