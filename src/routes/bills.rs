use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::{error_response, AppState};
use crate::models::bill::{Bill, StoredBill};

#[derive(Serialize)]
pub struct CreateBillResponse {
    pub id: u64,
    pub status: String,
}

#[derive(Serialize)]
pub struct BillListResponse {
    pub items: Vec<StoredBill>,
}

/// Handler for `POST /api/bills`
pub async fn create_bill(
    State(state): State<AppState>,
    Json(bill): Json<Bill>,
) -> Result<Json<CreateBillResponse>, Response> {
    let stored = state
        .bills
        .create(bill)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    info!("Created bill {} with {} items", stored.id, stored.bill.items.len());

    Ok(Json(CreateBillResponse {
        id: stored.id,
        status: "created".to_string(),
    }))
}

/// Handler for `GET /api/bills`
///
/// Returns the 20 most recent records.
pub async fn list_bills(State(state): State<AppState>) -> Json<BillListResponse> {
    Json(BillListResponse {
        items: state.bills.list(20),
    })
}
