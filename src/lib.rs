pub mod models;
pub mod routes;
pub mod services;

pub use models::tag::TagExtraction;
pub use services::ocr::parse_price_tag;
