use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

/// Storage diagnostics returned by `GET /test`
#[derive(Serialize)]
pub struct StorageReport {
    pub backend: String,
    pub storage: String,
    pub data_file: Option<String>,
    pub records: usize,
}

/// Handler for `GET /`
pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Shop Billing OCR API".to_string(),
    })
}

/// Handler for `GET /api/hello`
pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend API!".to_string(),
    })
}

/// Handler for `GET /test`
///
/// Reports whether the bill store is reachable and where it lives, so a
/// fresh deployment can be checked without writing anything.
pub async fn storage_check(State(state): State<AppState>) -> Json<StorageReport> {
    let data_file = state.bills.file_path();

    Json(StorageReport {
        backend: "running".to_string(),
        storage: if data_file.parent().map(|d| d.exists()).unwrap_or(false) {
            "available".to_string()
        } else {
            "unavailable".to_string()
        },
        data_file: data_file.to_str().map(String::from),
        records: state.bills.count(),
    })
}
