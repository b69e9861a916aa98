//! HTTP surface
//!
//! Serves the browser pages (form, paginated table, CSV download) and a small
//! JSON API over the same fetch and aggregation logic.

use crate::fetcher::PageSource;
use crate::{Config, Result};
use axum::{Router, http::HeaderValue, routing::get};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the router with all route definitions
///
/// # Routes
///
/// ## Browser
/// - `GET /` - Education code form
/// - `POST /scrape` - Paginated results (form fields `educationCode`, `page`)
/// - `GET /scrape` - Paginated results, or CSV export with `download=csv`
///
/// ## JSON
/// - `GET /api/v1/formasi` - One page of vacancies
/// - `GET /api/v1/export` - Every vacancy for an education code
/// - `GET /api/v1/health` - Health check
/// - `GET /api/v1/openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Swagger UI (if enabled)
///
/// Any other method on these paths answers 405 Method Not Allowed.
pub fn create_router(source: Arc<dyn PageSource>, config: Arc<Config>) -> Router {
    let state = AppState::new(source, config.clone());

    let router = Router::new()
        // Browser
        .route("/", get(routes::form))
        .route("/scrape", get(routes::scrape_get).post(routes::scrape_post))
        // JSON
        .route("/api/v1/formasi", get(routes::list_formasi))
        .route("/api/v1/export", get(routes::export_formasi))
        // System
        .route("/api/v1/health", get(routes::health_check))
        .route("/api/v1/openapi.json", get(routes::openapi_spec));

    // Swagger UI serves its own copy of the document so it does not clash with the route above
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state).layer(TraceLayer::new_for_http());

    if config.server.api.cors_enabled {
        router.layer(build_cors_layer(&config.server.api.cors_origins))
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` or an empty list allows any origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the server on the configured bind address.
///
/// Runs until `shutdown` resolves; in-flight requests are allowed to finish.
///
/// # Example
///
/// ```no_run
/// use formasi_export::{Config, HttpPageSource, shutdown_signal};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let source = Arc::new(HttpPageSource::new(&config.upstream)?);
///
/// formasi_export::api::start_api_server(source, config, shutdown_signal()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server<F>(
    source: Arc<dyn PageSource>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.api.bind_address;

    tracing::info!(address = %bind_address, "Starting server");

    let app = create_router(source, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(address = %bind_address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
