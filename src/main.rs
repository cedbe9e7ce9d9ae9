use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use billing_ocr::routes::{self, AppState};
use billing_ocr::services::bill_store::BillStore;
use billing_ocr::services::config::ConfigManager;
use billing_ocr::services::ocr::OcrSpaceClient;

#[tokio::main]
async fn main() {
    let manager = ConfigManager::new().expect("Failed to initialize config manager");
    let config = manager
        .load_with_env()
        .expect("Failed to load configuration");

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let ocr = OcrSpaceClient::new(&config.ocr).expect("Failed to create OCR client");
    let data_dir = config
        .storage
        .resolve_data_dir()
        .expect("Failed to resolve data directory");
    let bills = BillStore::open(data_dir).expect("Failed to open bill store");

    let state = AppState {
        ocr,
        bills: Arc::new(bills),
    };
    let app = routes::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid server address");

    info!("Shop Billing OCR API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
