use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Hero headlines rotated by the landing page A/B test, control first.
///
/// Submissions carrying any other label are still stored verbatim.
pub const HEADLINE_VARIANTS: [&str; 3] = [
    "Never Miss a Dose Again.",
    "The Peace of Mind Pill Cap.",
    "Automatic Reminders Without the Apps.",
];

pub fn is_known_variant(label: &str) -> bool {
    HEADLINE_VARIANTS.contains(&label)
}

/// A stored waitlist signup. Mirrors the `leads` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub ab_variant: Option<String>,
    pub created_at: String,
}

/// The body the landing page posts to `POST /api/waitlist`.
///
/// Every field is optional on the wire so a missing `name` surfaces as a
/// validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Default)]
pub struct WaitlistSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub ab_headline_variant: Option<String>,
}

/// A validated lead, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub ab_variant: Option<String>,
}

impl WaitlistSubmission {
    /// Pick the submission fields out of a decoded JSON or form body.
    ///
    /// Numbers and booleans are kept as their text; a field holding an array
    /// or object is treated as absent.
    pub fn from_body(body: &Value) -> Self {
        Self {
            name: scalar_text(body, "name"),
            email: scalar_text(body, "email"),
            ab_headline_variant: scalar_text(body, "ab_headline_variant"),
        }
    }

    /// Trim every field and require a non-blank `name` and `email`.
    ///
    /// A blank variant is normalised to `None`. The email format is not
    /// checked.
    pub fn validate(self) -> Result<NewLead, ValidationError> {
        let name = non_blank(self.name).ok_or(ValidationError::MissingContact)?;
        let email = non_blank(self.email).ok_or(ValidationError::MissingContact)?;
        Ok(NewLead {
            name,
            email,
            ab_variant: non_blank(self.ab_headline_variant),
        })
    }
}

/// Trim `value` and collapse empty strings to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Field `key` of `body` as text, if it holds a string, number or bool.
pub fn scalar_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
