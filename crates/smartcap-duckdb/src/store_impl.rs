use std::collections::BTreeMap;

use async_trait::async_trait;

use smartcap_core::{
    lead::{Lead, NewLead},
    page_view::{NewPageView, PageView},
    store::LandingStore,
};

use crate::DuckDbBackend;

#[async_trait]
impl LandingStore for DuckDbBackend {
    async fn insert_lead(&self, lead: &NewLead) -> anyhow::Result<i64> {
        DuckDbBackend::insert_lead(self, lead).await
    }

    async fn insert_page_view(&self, view: &NewPageView) -> anyhow::Result<i64> {
        DuckDbBackend::insert_page_view(self, view).await
    }

    async fn count_leads(&self) -> anyhow::Result<i64> {
        DuckDbBackend::count_leads(self).await
    }

    async fn count_page_views(&self) -> anyhow::Result<i64> {
        DuckDbBackend::count_page_views(self).await
    }

    async fn lead_variant_counts(&self) -> anyhow::Result<BTreeMap<String, i64>> {
        DuckDbBackend::lead_variant_counts(self).await
    }

    async fn recent_leads(&self, limit: usize) -> anyhow::Result<Vec<Lead>> {
        DuckDbBackend::recent_leads(self, limit).await
    }

    async fn recent_page_views(&self, limit: usize) -> anyhow::Result<Vec<PageView>> {
        DuckDbBackend::recent_page_views(self, limit).await
    }

    async fn ping(&self) -> anyhow::Result<()> {
        DuckDbBackend::ping(self).await
    }

    async fn checkpoint(&self) -> anyhow::Result<()> {
        DuckDbBackend::checkpoint(self).await
    }
}
