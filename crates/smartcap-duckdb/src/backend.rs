use std::sync::Arc;

use anyhow::Result;
use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::info;

use crate::schema::init_sql;

/// The single-file store behind the landing page.
///
/// Opened once at startup and shared by every handler. DuckDB serialises
/// writes internally; the connection sits behind `Arc<Mutex<_>>` so the
/// struct can be shared across Axum handlers and each statement runs
/// against a consistent handle.
pub struct DuckDbBackend {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Open (or create) the database file at `path` and bootstrap the schema.
    ///
    /// `memory_limit` is a DuckDB size string such as `"256MB"`.
    pub fn open(path: &str, memory_limit: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&init_sql(memory_limit))?;
        info!(path, memory_limit, "DuckDB opened");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an **in-memory** database. Data is discarded on drop; tests only.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&init_sql("256MB"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute `SELECT 1` as a liveness check.
    pub async fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch("SELECT 1")?;
        Ok(())
    }

    /// Force a checkpoint so the WAL is folded into the database file.
    pub async fn checkpoint(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch("CHECKPOINT")?;
        Ok(())
    }

    /// Raw connection access for store tests that need rows the typed
    /// inserts cannot produce, such as a fixed `created_at`.
    pub async fn conn_for_test(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}
