use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use smartcap_duckdb::DuckDbBackend;
use smartcap_server::{notify::build_notifier, state::AppState};

/// `smartcap health` - liveness probe for Docker HEALTHCHECK.
///
/// Calls `GET http://localhost:$PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }
    // Structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("smartcap=info".parse()?),
        )
        .json()
        .init();

    let cfg = smartcap_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    if let Some(parent) = std::path::Path::new(&cfg.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let db = DuckDbBackend::open(&cfg.database_path, &cfg.duckdb_memory_limit)?;

    let notifier = build_notifier(&cfg.notification);
    let state = Arc::new(AppState::new(Arc::new(db), notifier));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = smartcap_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "SmartCap listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    })
    .await?;

    info!("Closing database connection...");
    match tokio::time::timeout(std::time::Duration::from_secs(5), state.store.checkpoint()).await {
        Ok(Ok(())) => info!("Database connection closed"),
        Ok(Err(e)) => tracing::error!(error = %e, "Checkpoint on shutdown failed"),
        Err(_) => tracing::error!("Checkpoint on shutdown timed out"),
    }

    Ok(())
}
