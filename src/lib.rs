//! # formasi-export
//!
//! Browse and bulk-export civil service vacancy ("formasi") listings served by
//! a paginated upstream JSON API.
//!
//! ## Overview
//!
//! - [`fetcher`] - one request per offset window, envelope validation
//! - [`planner`] - splits a record count into offset batches
//! - [`aggregator`] - fetches every batch concurrently and reassembles them in
//!   offset order, failing the whole export if any batch fails
//! - [`render`] - HTML table and CSV output
//! - [`api`] - axum router wiring it all to HTTP
//!
//! ## Quick Start
//!
//! ```no_run
//! use formasi_export::{Aggregator, Config, FilterKeys, HttpPageSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let source = Arc::new(HttpPageSource::new(&config.upstream)?);
//!     let aggregator = Aggregator::new(source, config.upstream.page_size);
//!
//!     let records = aggregator
//!         .aggregate(&FilterKeys::new("5101087", "2"))
//!         .await?;
//!     let csv = formasi_export::render::csv::to_csv(&records, &config.upstream.detail_base_url)?;
//!     std::fs::write("data_formasi.csv", csv)?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Concurrent full-dataset retrieval
pub mod aggregator;
/// HTTP surface
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Upstream page fetching
pub mod fetcher;
/// Presentation transforms
pub mod formatting;
/// Offset batch planning
pub mod planner;
/// HTML and CSV output
pub mod render;
/// Core types
pub mod types;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use aggregator::{Aggregator, BatchResult};
pub use config::{ApiConfig, Config, UpstreamConfig};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use fetcher::{HttpPageSource, PageSource};
pub use types::{FilterKeys, Formasi, Page, PageView};

/// Resolve when the process receives a termination signal.
///
/// Pass this to [`api::start_api_server`] for graceful shutdown.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register signal handler, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

/// Resolve when the process receives Ctrl+C.
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
