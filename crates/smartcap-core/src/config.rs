pub const DEFAULT_NOTIFICATION_FROM: &str = "SmartCap Alerts <onboarding@resend.dev>";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// DuckDB file path, from `DATABASE_URL`.
    pub database_path: String,
    pub duckdb_memory_limit: String,
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Operator address every signup is reported to.
    pub to: Option<String>,
    pub from: String,
    pub resend_api_key: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Which transport the server should build for lead notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTransport {
    Resend { api_key: String, to: String },
    Smtp { smtp: SmtpConfig, to: String },
    Disabled,
}

impl NotificationConfig {
    /// Resend wins over SMTP when both are configured. Without a destination
    /// address nothing is sent.
    pub fn transport(&self) -> NotificationTransport {
        let Some(to) = self.to.clone() else {
            return NotificationTransport::Disabled;
        };
        if let Some(api_key) = self.resend_api_key.clone() {
            return NotificationTransport::Resend { api_key, to };
        }
        match self.smtp.clone() {
            Some(smtp) => NotificationTransport::Smtp { smtp, to },
            None => NotificationTransport::Disabled,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let smtp = match var("SMARTCAP_SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: match var("SMARTCAP_SMTP_PORT") {
                    Some(raw) => raw
                        .parse()
                        .map_err(|e| format!("invalid SMARTCAP_SMTP_PORT: {e}"))?,
                    None => 587,
                },
                username: var("SMARTCAP_SMTP_USERNAME"),
                password: var("SMARTCAP_SMTP_PASSWORD"),
            }),
            None => None,
        };

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            database_path: var("DATABASE_URL").unwrap_or_else(|| "./waitlist.db".to_string()),
            duckdb_memory_limit: var("SMARTCAP_DUCKDB_MEMORY")
                .unwrap_or_else(|| "256MB".to_string()),
            notification: NotificationConfig {
                to: var("NOTIFICATION_EMAIL"),
                from: var("SMARTCAP_NOTIFICATION_FROM")
                    .unwrap_or_else(|| DEFAULT_NOTIFICATION_FROM.to_string()),
                resend_api_key: var("RESEND_API_KEY"),
                smtp,
            },
        })
    }
}
