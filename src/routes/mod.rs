pub mod bills;
pub mod extract;
pub mod status;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::services::bill_store::BillStore;
use crate::services::ocr::OcrSpaceClient;

/// Shared state handed to every route handler
#[derive(Clone)]
pub struct AppState {
    pub ocr: OcrSpaceClient,
    pub bills: Arc<BillStore>,
}

/// Error payload returned by all API endpoints
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Build a JSON error response with the given status
pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Assemble the service router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::root))
        .route("/api/hello", get(status::hello))
        .route("/test", get(status::storage_check))
        .route("/api/extract-tag", post(extract::extract_tag))
        .route("/api/bills", post(bills::create_bill).get(bills::list_bills))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
