//! Storage abstraction for the two append-only tables.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    lead::{Lead, NewLead},
    page_view::{NewPageView, PageView},
};

/// Append-only persistence for leads and page views.
///
/// The two tables are independent; no operation spans both. Every method is
/// atomic at the single-row level. Failures are storage errors.
#[async_trait]
pub trait LandingStore: Send + Sync + 'static {
    /// Insert a validated lead and return its new id.
    async fn insert_lead(&self, lead: &NewLead) -> anyhow::Result<i64>;

    /// Insert a page view and return its new id.
    async fn insert_page_view(&self, view: &NewPageView) -> anyhow::Result<i64>;

    async fn count_leads(&self) -> anyhow::Result<i64>;

    async fn count_page_views(&self) -> anyhow::Result<i64>;

    /// Lead counts keyed by variant label. Leads without a variant are
    /// excluded.
    async fn lead_variant_counts(&self) -> anyhow::Result<BTreeMap<String, i64>>;

    /// At most `limit` leads, newest first.
    async fn recent_leads(&self, limit: usize) -> anyhow::Result<Vec<Lead>>;

    /// At most `limit` page views, newest first.
    async fn recent_page_views(&self, limit: usize) -> anyhow::Result<Vec<PageView>>;

    /// Lightweight liveness check.
    async fn ping(&self) -> anyhow::Result<()>;

    /// Flush pending writes to durable storage. Called once at shutdown.
    async fn checkpoint(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
