use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use base64::{engine::general_purpose, Engine as _};
use tracing::{info, warn};

use super::{error_response, AppState};
use crate::models::tag::TagExtraction;
use crate::services::ocr::{parse_price_tag, OcrError};

/// Image source taken out of the multipart form
enum ImageSource {
    Upload { filename: String, bytes: Vec<u8> },
    Base64(String),
    Url(String),
}

/// Handler for `POST /api/extract-tag`
///
/// Accepts a multipart form with one of `file` (binary upload),
/// `image_base64` (text), or `url` (text). The image goes to the OCR
/// provider; the recognized text goes through the pricing heuristic.
pub async fn extract_tag(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TagExtraction>, Response> {
    let source = read_image_source(multipart)
        .await?
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Provide an image file or a URL"))?;

    let text = match source {
        ImageSource::Upload { filename, bytes } => {
            state.ocr.parse_image_bytes(&filename, bytes).await
        }
        ImageSource::Base64(data) => {
            let bytes = decode_base64_image(&data)
                .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
            state.ocr.parse_image_bytes("image.png", bytes).await
        }
        ImageSource::Url(url) => state.ocr.parse_image_url(&url).await,
    };

    let text = text.map_err(|e| match e {
        OcrError::Unreadable(message) => {
            warn!("OCR could not read the image: {}", message);
            error_response(StatusCode::BAD_REQUEST, message)
        }
        OcrError::Provider(message) => {
            warn!("OCR provider failure: {}", message);
            error_response(StatusCode::BAD_GATEWAY, format!("OCR service error: {}", message))
        }
    })?;

    let extraction = parse_price_tag(&text);
    info!(
        "Extracted tag: name={:?} mrp={:?} sell_price={:?}",
        extraction.name, extraction.mrp, extraction.sell_price
    );

    Ok(Json(extraction))
}

/// Pull the first usable image source out of the form
///
/// When several are supplied the upload wins, then base64, then url.
async fn read_image_source(mut multipart: Multipart) -> Result<Option<ImageSource>, Response> {
    let mut upload: Option<ImageSource> = None;
    let mut base64_data: Option<String> = None;
    let mut url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("image.jpg").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    error_response(StatusCode::BAD_REQUEST, format!("Failed to read upload: {}", e))
                })?;
                upload = Some(ImageSource::Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            "image_base64" => {
                let data = field.text().await.map_err(|e| {
                    error_response(StatusCode::BAD_REQUEST, format!("Failed to read field: {}", e))
                })?;
                base64_data = Some(data);
            }
            "url" => {
                let data = field.text().await.map_err(|e| {
                    error_response(StatusCode::BAD_REQUEST, format!("Failed to read field: {}", e))
                })?;
                url = Some(data);
            }
            _ => {}
        }
    }

    Ok(upload
        .or(base64_data.map(ImageSource::Base64))
        .or(url.map(ImageSource::Url)))
}

/// Decode a base64 image payload, tolerating a `data:` URI prefix
fn decode_base64_image(data: &str) -> Result<Vec<u8>, String> {
    let payload = match data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("Invalid base64 image: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_base64() {
        let encoded = general_purpose::STANDARD.encode(b"fake image bytes");
        let decoded = decode_base64_image(&encoded).expect("plain base64 should decode");
        assert_eq!(decoded, b"fake image bytes");
    }

    #[test]
    fn test_decode_data_uri_base64() {
        let encoded = general_purpose::STANDARD.encode(b"png payload");
        let data_uri = format!("data:image/png;base64,{}", encoded);
        let decoded = decode_base64_image(&data_uri).expect("data URI should decode");
        assert_eq!(decoded, b"png payload");
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let encoded = format!("  {}\n", general_purpose::STANDARD.encode(b"x"));
        assert_eq!(decode_base64_image(&encoded).unwrap(), b"x");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_base64_image("not base64 at all!!");
        assert!(result.is_err(), "Garbage input should be rejected");
    }
}
