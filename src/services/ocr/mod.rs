pub mod ocr_space;
pub mod parser;

// Re-export main types
pub use ocr_space::{OcrError, OcrSpaceClient};
pub use parser::parse_price_tag;
