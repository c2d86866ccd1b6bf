//! Route configuration and setup.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use encore_core::ApiConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handlers;
use crate::state::AppState;

/// The endpoint only ever receives small JSON metadata bodies; the media
/// payloads themselves go straight to the external host.
const JSON_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn build_router(config: &ApiConfig, state: Arc<AppState>) -> Result<Router> {
    let cors = setup_cors(config)?;

    let router = Router::new()
        .route("/health/live", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route(
            "/api/log-upload",
            post(handlers::log_upload::log_upload)
                .fallback(handlers::log_upload::method_not_allowed),
        )
        .route("/api/openapi.json", get(openapi_spec))
        .with_state(state)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(RequestBodyLimitLayer::new(JSON_BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::api_doc::ApiDoc::openapi())
}

/// CORS: explicit origins from configuration, or any origin when none are
/// configured (the upload form is a public page).
fn setup_cors(config: &ApiConfig) -> Result<CorsLayer> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.cors_origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Invalid CORS origin")?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers(Any))
}
