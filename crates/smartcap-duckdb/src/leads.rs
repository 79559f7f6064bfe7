use std::collections::BTreeMap;

use anyhow::Result;

use smartcap_core::lead::{Lead, NewLead};

use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Insert one lead and return the id assigned by `leads_id_seq`.
    pub async fn insert_lead(&self, lead: &NewLead) -> Result<i64> {
        let conn = self.conn.lock().await;
        let id: i64 = conn.query_row(
            "INSERT INTO leads (name, email, ab_variant) VALUES (?1, ?2, ?3) RETURNING id",
            duckdb::params![lead.name, lead.email, lead.ab_variant],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub async fn count_leads(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM leads", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Leads per headline variant. NULL variants are left out.
    pub async fn lead_variant_counts(&self) -> Result<BTreeMap<String, i64>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT ab_variant, COUNT(*) FROM leads \
             WHERE ab_variant IS NOT NULL \
             GROUP BY ab_variant",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut counts = BTreeMap::new();
        for row in rows {
            let (variant, count) = row?;
            counts.insert(variant, count);
        }
        Ok(counts)
    }

    /// Newest leads first. Ties on `created_at` fall back to the id so a
    /// fresh insert is always at position 0.
    pub async fn recent_leads(&self, limit: usize) -> Result<Vec<Lead>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, ab_variant, CAST(created_at AS VARCHAR) \
             FROM leads \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(duckdb::params![limit], |row| {
            Ok(Lead {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                ab_variant: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        let mut leads = Vec::new();
        for row in rows {
            leads.push(row?);
        }
        Ok(leads)
    }
}
