//! formasi-export server
//!
//! Serves the search form on the configured address. Settings come from the
//! environment (`PORT`, `FORMASI_API_URL`, `FORMASI_CATEGORY_CODE`,
//! `FORMASI_TIMEOUT_SECS`); log verbosity from `RUST_LOG`.

use formasi_export::{Config, HttpPageSource, api, shutdown_signal};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,formasi_export=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let source = HttpPageSource::new(&config.upstream)?;

    tracing::info!(
        upstream = %config.upstream.base_url,
        category = %config.upstream.category_code,
        page_size = config.upstream.page_size,
        "Configuration loaded"
    );

    api::start_api_server(Arc::new(source), Arc::new(config), shutdown_signal()).await?;

    Ok(())
}
