//! Operator notification for new waitlist signups.

use async_trait::async_trait;

use crate::{error::NotificationError, lead::NewLead};

/// Placeholder shown when the visitor was not assigned a headline.
pub const NO_VARIANT: &str = "None";

/// What the operator is told about a new lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadNotification {
    pub lead_id: i64,
    pub name: String,
    pub email: String,
    pub ab_variant: Option<String>,
}

impl LeadNotification {
    pub fn new(lead_id: i64, lead: &NewLead) -> Self {
        Self {
            lead_id,
            name: lead.name.clone(),
            email: lead.email.clone(),
            ab_variant: lead.ab_variant.clone(),
        }
    }

    pub fn subject(&self) -> String {
        format!("New Waitlist Signup: {}", self.name)
    }

    pub fn text_body(&self) -> String {
        format!(
            "You just received a new SmartCap waitlist signup!\n\n\
             Name: {}\nEmail: {}\nA/B Variant Seen: {}\n\n\
             Log in to your dashboard to view all your leads.",
            self.name,
            self.email,
            self.ab_variant.as_deref().unwrap_or(NO_VARIANT),
        )
    }
}

/// Outbound notification transport.
///
/// Implementations are invoked from a detached task; their result is only
/// ever logged.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, notification: &LeadNotification) -> Result<(), NotificationError>;

    /// `false` when the transport is not configured and dispatch should be
    /// skipped entirely.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// [`Notifier`] used when no credentials or destination are configured.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _notification: &LeadNotification) -> Result<(), NotificationError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
