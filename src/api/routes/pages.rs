//! Browser-facing handlers: form, paginated table and CSV download.

use super::{ScrapeForm, ScrapeQuery, parse_page, require_education_code};
use crate::api::AppState;
use crate::api::error_response::PageError;
use crate::render::csv::{CSV_FILENAME, to_csv};
use crate::render::html::{render_form, render_results};
use axum::{
    Form,
    extract::{Query, State, rejection::FormRejection},
    http::header,
    response::{Html, IntoResponse, Response},
};

/// GET / - Education code input form
pub async fn form() -> Html<String> {
    Html(render_form())
}

/// POST /scrape - Paginated results for the submitted form
///
/// A body that is not a form counts as a missing education code.
pub async fn scrape_post(
    State(state): State<AppState>,
    form: Result<Form<ScrapeForm>, FormRejection>,
) -> Result<Response, PageError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable scrape form");
            ScrapeForm::default()
        }
    };
    let code = require_education_code(form.education_code.as_deref())?;
    let page = parse_page(form.page.as_deref());
    results_page(&state, &code, page).await
}

/// GET /scrape - Paginated results, or the CSV export with `download=csv`
pub async fn scrape_get(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> Result<Response, PageError> {
    let code = require_education_code(query.education_code.as_deref())?;

    if query.download.as_deref() == Some("csv") {
        return download_csv(&state, &code).await;
    }

    let page = parse_page(query.page.as_deref());
    results_page(&state, &code, page).await
}

async fn results_page(state: &AppState, code: &str, page: usize) -> Result<Response, PageError> {
    let view = state
        .aggregator
        .page(page, &state.filter_for(code))
        .await
        .inspect_err(|e| {
            tracing::error!(education_code = %code, page, error = %e, "Failed to fetch page");
        })?;

    Ok(Html(render_results(code, &view, &state.config.upstream.detail_base_url)).into_response())
}

async fn download_csv(state: &AppState, code: &str) -> Result<Response, PageError> {
    let records = state
        .aggregator
        .aggregate(&state.filter_for(code))
        .await
        .inspect_err(|e| {
            tracing::error!(education_code = %code, error = %e, "CSV export failed");
        })?;

    // Fully rendered before anything is sent, so a failure never yields a partial file
    let body = to_csv(&records, &state.config.upstream.detail_base_url)?;

    tracing::info!(
        education_code = %code,
        records = records.len(),
        bytes = body.len(),
        "Serving CSV export"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}
