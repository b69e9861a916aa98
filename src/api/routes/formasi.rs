//! JSON endpoints over the same page fetch and aggregation as the HTML surface.

use super::{FormasiQuery, require_education_code};
use crate::api::AppState;
use crate::error::Result;
use crate::types::PageView;
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};

/// GET /api/v1/formasi - One page of vacancies
#[utoipa::path(
    get,
    path = "/api/v1/formasi",
    tag = "formasi",
    params(FormasiQuery),
    responses(
        (status = 200, description = "One page of vacancies", body = crate::types::PageView),
        (status = 400, description = "Education code missing", body = crate::error::ApiError),
        (status = 500, description = "Upstream fetch failed", body = crate::error::ApiError)
    )
)]
pub async fn list_formasi(
    State(state): State<AppState>,
    Query(query): Query<FormasiQuery>,
) -> Result<Json<PageView>> {
    let code = require_education_code(query.education_code.as_deref())?;
    let page = query.page.unwrap_or(1).max(1);

    let view = state.aggregator.page(page, &state.filter_for(&code)).await?;
    Ok(Json(view))
}

/// GET /api/v1/export - Every vacancy for an education code
#[utoipa::path(
    get,
    path = "/api/v1/export",
    tag = "formasi",
    params(
        ("educationCode" = String, Query, description = "Education code to export")
    ),
    responses(
        (status = 200, description = "All vacancies in upstream order", body = Vec<crate::types::Formasi>),
        (status = 400, description = "Education code missing", body = crate::error::ApiError),
        (status = 500, description = "Any batch failed; nothing is returned", body = crate::error::ApiError)
    )
)]
pub async fn export_formasi(
    State(state): State<AppState>,
    Query(query): Query<FormasiQuery>,
) -> Result<Json<Value>> {
    let code = require_education_code(query.education_code.as_deref())?;

    let records = state
        .aggregator
        .aggregate(&state.filter_for(&code))
        .await
        .inspect_err(|e| {
            tracing::error!(education_code = %code, error = %e, "JSON export failed");
        })?;

    Ok(Json(json!({
        "total": records.len(),
        "items": records,
    })))
}
