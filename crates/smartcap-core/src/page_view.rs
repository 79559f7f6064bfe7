use serde::{Deserialize, Serialize};

use serde_json::Value;

use crate::lead::{non_blank, scalar_text};

/// A stored page load. Mirrors the `page_views` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub page_url: Option<String>,
    pub created_at: String,
}

/// Client-supplied part of `POST /api/pageview`. Nothing is required.
#[derive(Debug, Clone, Default)]
pub struct PageViewPayload {
    pub referrer: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub page_url: Option<String>,
}

/// A page view ready to insert: the client payload plus request metadata
/// derived server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPageView {
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub referrer: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub page_url: Option<String>,
}

impl PageViewPayload {
    /// Read the optional fields from a decoded body. Any field that is not a
    /// string, number or bool is dropped rather than rejected.
    pub fn from_body(body: &Value) -> Self {
        Self {
            referrer: scalar_text(body, "referrer"),
            utm_source: scalar_text(body, "utm_source"),
            utm_medium: scalar_text(body, "utm_medium"),
            utm_campaign: scalar_text(body, "utm_campaign"),
            page_url: scalar_text(body, "page_url"),
        }
    }

    /// Attach request metadata. Blank optional fields are stored as NULL.
    pub fn into_new_page_view(
        self,
        ip_address: Option<String>,
        user_agent: String,
    ) -> NewPageView {
        NewPageView {
            ip_address,
            user_agent,
            referrer: non_blank(self.referrer),
            utm_source: non_blank(self.utm_source),
            utm_medium: non_blank(self.utm_medium),
            utm_campaign: non_blank(self.utm_campaign),
            page_url: non_blank(self.page_url),
        }
    }
}
