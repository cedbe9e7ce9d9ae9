use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::config::OcrConfig;

/// Failure modes when talking to the OCR provider
///
/// `Provider` covers transport failures and non-2xx answers; `Unreadable`
/// means the provider answered but could not read any text from the image.
#[derive(Debug, Clone, PartialEq)]
pub enum OcrError {
    Provider(String),
    Unreadable(String),
}

impl std::fmt::Display for OcrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrError::Provider(msg) => write!(f, "OCR service error: {}", msg),
            OcrError::Unreadable(msg) => write!(f, "{}", msg),
        }
    }
}

/// HTTP client for the OCR.space parse API
#[derive(Clone)]
pub struct OcrSpaceClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
    engine: u8,
}

/// One recognized region of the image
#[derive(Deserialize)]
struct ParsedRegion {
    #[serde(rename = "ParsedText", default)]
    parsed_text: String,
}

/// Response envelope from OCR.space
#[derive(Deserialize)]
struct OcrSpaceResponse {
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Vec<ParsedRegion>,
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored_on_processing: bool,
    // String or array of strings depending on the failure
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<serde_json::Value>,
}

impl OcrSpaceClient {
    /// Create a new client from provider configuration
    pub fn new(config: &OcrConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            engine: config.engine,
        })
    }

    /// Run OCR over uploaded image bytes
    pub async fn parse_image_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, OcrError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = self.base_form().part("file", part);
        self.submit(form).await
    }

    /// Run OCR over an image the provider fetches itself
    pub async fn parse_image_url(&self, url: &str) -> Result<String, OcrError> {
        let form = self.base_form().text("url", url.to_string());
        self.submit(form).await
    }

    /// Common form fields sent with every parse request
    fn base_form(&self) -> Form {
        Form::new()
            .text("language", self.language.clone())
            .text("OCREngine", self.engine.to_string())
            .text("isOverlayRequired", "false")
    }

    async fn submit(&self, form: Form) -> Result<String, OcrError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| OcrError::Provider(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("OCR provider returned {}: {}", status, truncate(&body, 120));
            return Err(OcrError::Provider(format!(
                "{}: {}",
                status,
                truncate(&body, 120)
            )));
        }

        let data: OcrSpaceResponse = response
            .json()
            .await
            .map_err(|e| OcrError::Provider(format!("invalid response body: {}", e)))?;

        if data.is_errored_on_processing || data.parsed_results.is_empty() {
            let message = data
                .error_message
                .map(render_error_message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unable to read text".to_string());
            return Err(OcrError::Unreadable(message));
        }

        let text = join_parsed_text(&data.parsed_results);
        debug!("OCR produced {} characters of text", text.len());
        Ok(text)
    }
}

/// Concatenate the text of all recognized regions, one region per line
fn join_parsed_text(regions: &[ParsedRegion]) -> String {
    regions
        .iter()
        .map(|r| r.parsed_text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// OCR.space reports errors either as a bare string or an array of strings
fn render_error_message(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(parts) => parts
            .iter()
            .filter_map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_client() -> OcrSpaceClient {
        OcrSpaceClient::new(&OcrConfig::default()).expect("client should build from defaults")
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let client = demo_client();
        assert_eq!(client.endpoint, "https://api.ocr.space/parse/image");
        assert_eq!(client.api_key, "helloworld");
        assert_eq!(client.language, "eng");
        assert_eq!(client.engine, 2);
    }

    #[test]
    fn test_successful_response_joins_all_regions() {
        let payload = r#"{
            "ParsedResults": [
                {"ParsedText": "Lavender Soap"},
                {"ParsedText": "MRP: 120"}
            ],
            "IsErroredOnProcessing": false
        }"#;

        let data: OcrSpaceResponse = serde_json::from_str(payload).unwrap();
        assert!(!data.is_errored_on_processing);
        assert_eq!(join_parsed_text(&data.parsed_results), "Lavender Soap\nMRP: 120");
    }

    #[test]
    fn test_response_with_missing_fields_uses_defaults() {
        let data: OcrSpaceResponse = serde_json::from_str("{}").unwrap();
        assert!(data.parsed_results.is_empty());
        assert!(!data.is_errored_on_processing);
        assert!(data.error_message.is_none());
    }

    #[test]
    fn test_errored_response_carries_message() {
        let payload = r#"{
            "ParsedResults": [],
            "IsErroredOnProcessing": true,
            "ErrorMessage": ["Unable to recognize the file type", "E216"]
        }"#;

        let data: OcrSpaceResponse = serde_json::from_str(payload).unwrap();
        assert!(data.is_errored_on_processing);

        let message = render_error_message(data.error_message.unwrap());
        assert_eq!(message, "Unable to recognize the file type; E216");
    }

    #[test]
    fn test_render_error_message_plain_string() {
        let message = render_error_message(serde_json::json!("Invalid API key"));
        assert_eq!(message, "Invalid API key");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
        assert_eq!(truncate("₹₹₹₹₹₹", 3), "₹₹₹");
    }

    #[test]
    fn test_ocr_error_display() {
        let provider = OcrError::Provider("502 Bad Gateway".to_string());
        assert_eq!(provider.to_string(), "OCR service error: 502 Bad Gateway");

        let unreadable = OcrError::Unreadable("Unable to read text".to_string());
        assert_eq!(unreadable.to_string(), "Unable to read text");
    }
}
