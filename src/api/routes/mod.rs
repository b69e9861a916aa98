//! Route handlers
//!
//! Handlers are organized by surface:
//! - [`pages`] - HTML form, paginated table and CSV download
//! - [`formasi`] - JSON page and export endpoints
//! - [`system`] - Health and OpenAPI

use serde::{Deserialize, Serialize};

mod formasi;
mod pages;
mod system;

pub use formasi::*;
pub use pages::*;
pub use system::*;

// ============================================================================
// Query/Request Types (shared across handlers)
// ============================================================================

/// Fields accepted by `POST /scrape`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScrapeForm {
    /// Education code to search for
    #[serde(rename = "educationCode", default)]
    pub education_code: Option<String>,
    /// 1-based page number; anything unparseable means page 1
    #[serde(default)]
    pub page: Option<String>,
}

/// Query parameters accepted by `GET /scrape`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScrapeQuery {
    /// Education code to search for
    #[serde(rename = "educationCode", default)]
    pub education_code: Option<String>,
    /// 1-based page number; anything unparseable means page 1
    #[serde(default)]
    pub page: Option<String>,
    /// `csv` switches to the full export
    #[serde(default)]
    pub download: Option<String>,
}

/// Query parameters for the JSON endpoints
#[derive(Debug, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormasiQuery {
    /// Education code to search for
    #[serde(rename = "educationCode", default)]
    pub education_code: Option<String>,
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<usize>,
}

/// Lenient page parsing: missing, non-numeric or < 1 all mean page 1
pub(crate) fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

/// Trimmed, non-empty education code or a validation error
pub(crate) fn require_education_code(raw: Option<&str>) -> crate::Result<String> {
    match raw.map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => Err(crate::Error::Validation(
            "education code is required".to_string(),
        )),
    }
}
