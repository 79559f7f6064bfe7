/// DuckDB initialization SQL.
///
/// Executed once at open time via `Connection::execute_batch`. Every
/// statement uses `IF NOT EXISTS` so it is safe to re-run on each startup.
///
/// `leads` and `page_views` are independent append-only logs: no foreign
/// keys, no shared identifier. Ids come from one sequence per table so they
/// are strictly increasing in insert order.
///
/// `memory_limit` comes from `Config.duckdb_memory_limit`
/// (env `SMARTCAP_DUCKDB_MEMORY`, default `"256MB"`).
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

-- ===========================================
-- LEADS (waitlist signups)
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS leads_id_seq START 1;
CREATE TABLE IF NOT EXISTS leads (
    id              BIGINT PRIMARY KEY DEFAULT nextval('leads_id_seq'),
    name            VARCHAR NOT NULL,
    email           VARCHAR NOT NULL,              -- format not validated, duplicates allowed
    ab_variant      VARCHAR,                       -- headline shown to the visitor, NULL if unknown
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_leads_created ON leads(created_at);

-- ===========================================
-- PAGE VIEWS (one row per page load)
-- ===========================================
CREATE SEQUENCE IF NOT EXISTS page_views_id_seq START 1;
CREATE TABLE IF NOT EXISTS page_views (
    id              BIGINT PRIMARY KEY DEFAULT nextval('page_views_id_seq'),
    ip_address      VARCHAR,                       -- X-Forwarded-For first hop, else peer address
    user_agent      VARCHAR,
    referrer        VARCHAR,
    utm_source      VARCHAR,
    utm_medium      VARCHAR,
    utm_campaign    VARCHAR,
    page_url        VARCHAR,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_page_views_created ON page_views(created_at);
"#
    )
}
