//! Core types: vacancy records, the upstream envelope, and request filters

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// One vacancy ("formasi") entry as served by the upstream API
///
/// Records are immutable once decoded. Salaries stay as the digit strings the
/// upstream sends; [`crate::formatting`] turns them into display values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Formasi {
    /// Upstream identifier, also used to build the detail link
    #[serde(default, deserialize_with = "null_as_default")]
    pub formasi_id: String,

    /// Organization (agency) name
    #[serde(default, deserialize_with = "null_as_default")]
    pub ins_nm: String,

    /// Education-category name
    #[serde(default, deserialize_with = "null_as_default")]
    pub jp_nama: String,

    /// Position-family name
    #[serde(default, deserialize_with = "null_as_default")]
    pub formasi_nm: String,

    /// Job-title name
    #[serde(default, deserialize_with = "null_as_default")]
    pub jabatan_nm: String,

    /// Work unit / location name
    #[serde(default, deserialize_with = "null_as_default")]
    pub lokasi_nm: String,

    /// Required headcount
    #[serde(default, deserialize_with = "null_as_default")]
    pub jumlah_formasi: i64,

    /// Number of applicants who passed administrative screening
    #[serde(default, deserialize_with = "null_as_default")]
    pub jumlah_ms: i64,

    /// Minimum salary, digits only
    #[serde(default, deserialize_with = "null_as_default")]
    pub gaji_min: String,

    /// Maximum salary, digits only
    #[serde(default, deserialize_with = "null_as_default")]
    pub gaji_max: String,
}

/// Upstream response wrapper
///
/// ```json
/// {"status": 200, "error": false, "message": "success",
///  "data": {"meta": {"total": 25}, "page": {"total": 10}, "data": [ ... ]}}
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    /// HTTP-like status echoed in the body
    #[serde(default)]
    pub status: i64,

    /// Set when the upstream refused the request
    #[serde(default)]
    pub error: bool,

    /// Upstream message, meaningful when `error` is set
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Paginated payload; absent or `null` only when `error` is set
    #[serde(default)]
    pub data: Option<EnvelopeData>,
}

/// Paginated payload inside an [`Envelope`]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnvelopeData {
    /// Dataset-wide metadata
    pub meta: Count,

    /// Current-page metadata
    #[serde(default)]
    pub page: Count,

    /// Records of this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Formasi>,
}

/// `{"total": n}` object used for both dataset and page counts
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Count {
    /// Count value
    pub total: usize,
}

/// One decoded window of records
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Offset this page was requested at
    pub offset: usize,

    /// Records in upstream order
    pub records: Vec<Formasi>,

    /// Total number of records the upstream reports for the whole query
    pub total: usize,
}

/// Opaque filter keys forwarded verbatim to the upstream API
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilterKeys {
    /// Education code
    pub education_code: String,

    /// Category (procurement type) code
    pub category_code: String,
}

impl FilterKeys {
    /// Create filter keys
    pub fn new(education_code: impl Into<String>, category_code: impl Into<String>) -> Self {
        Self {
            education_code: education_code.into(),
            category_code: category_code.into(),
        }
    }
}

/// One page of records as returned by the JSON API
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PageView {
    /// Records on this page
    pub items: Vec<Formasi>,

    /// Total records for the query
    pub total: usize,

    /// 1-based page number
    pub page: usize,

    /// Number of pages available
    pub total_pages: usize,
}

// The upstream sends `null` instead of omitting empty fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
