use anyhow::Result;

use smartcap_core::page_view::{NewPageView, PageView};

use crate::DuckDbBackend;

impl DuckDbBackend {
    pub async fn insert_page_view(&self, view: &NewPageView) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn.query_row(
            r#"INSERT INTO page_views (
                ip_address, user_agent, referrer,
                utm_source, utm_medium, utm_campaign, page_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id"#,
            duckdb::params![
                view.ip_address,
                view.user_agent,
                view.referrer,
                view.utm_source,
                view.utm_medium,
                view.utm_campaign,
                view.page_url,
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub async fn count_page_views(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM page_views", [], |row| row.get(0))?;
        Ok(count)
    }

    pub async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"SELECT
                id, ip_address, user_agent, referrer,
                utm_source, utm_medium, utm_campaign, page_url,
                CAST(created_at AS VARCHAR)
            FROM page_views
            ORDER BY created_at DESC, id DESC
            LIMIT ?1"#,
        )?;
        let rows = stmt.query_map(duckdb::params![limit], |row| {
            Ok(PageView {
                id: row.get(0)?,
                ip_address: row.get(1)?,
                user_agent: row.get(2)?,
                referrer: row.get(3)?,
                utm_source: row.get(4)?,
                utm_medium: row.get(5)?,
                utm_campaign: row.get(6)?,
                page_url: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?;
        let mut views = Vec::new();
        for row in rows {
            views.push(row?);
        }
        Ok(views)
    }
}
