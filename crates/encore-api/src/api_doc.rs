//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Encore API",
        version = "0.1.0",
        description = "Upload-log API for the karaoke event site. Attendee media goes to the external media host directly; this service records one row per successful upload."
    ),
    paths(handlers::log_upload::log_upload),
    components(schemas(
        encore_core::models::LogUploadRequest,
        encore_core::models::LogUploadResponse,
        crate::error::ErrorResponse,
    )),
    tags((name = "uploads", description = "Upload logging"))
)]
pub struct ApiDoc;
