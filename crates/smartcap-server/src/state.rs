use std::sync::Arc;

use smartcap_core::{notify::Notifier, store::LandingStore};

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The store is opened once at startup and lives as long as the server.
pub struct AppState {
    /// Leads and page views. DuckDB in production; tests may swap in a
    /// failing or gated implementation.
    pub store: Arc<dyn LandingStore>,

    /// Transport for new-lead notifications. A [`NullNotifier`] when no
    /// credentials are configured.
    ///
    /// [`NullNotifier`]: smartcap_core::notify::NullNotifier
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn LandingStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }
}
