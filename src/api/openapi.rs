//! OpenAPI documentation for the JSON endpoints

use utoipa::OpenApi;

/// OpenAPI documentation for the formasi-export JSON API
///
/// Served at `/api/v1/openapi.json`, and through Swagger UI at `/swagger-ui`
/// when enabled. The HTML and CSV routes are not part of the document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "formasi-export API",
        description = "JSON access to paginated and fully aggregated vacancy listings",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    paths(
        crate::api::routes::list_formasi,
        crate::api::routes::export_formasi,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::Formasi,
        crate::types::PageView,
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "formasi", description = "Vacancy listings"),
        (name = "system", description = "Health and documentation")
    )
)]
pub struct ApiDoc;
