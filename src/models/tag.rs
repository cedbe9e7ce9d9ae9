use serde::{Deserialize, Serialize};

/// Pricing details recovered from the OCR text of a price tag
///
/// Each field except `raw_text` is optional: the heuristic degrades to
/// `None` whenever a value cannot be inferred, never to 0 or "".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagExtraction {
    pub raw_text: String,
    pub name: Option<String>,
    pub mrp: Option<f64>,
    pub sell_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_fields_serialize_as_null() {
        let extraction = TagExtraction {
            raw_text: "scribble".to_string(),
            name: None,
            mrp: None,
            sell_price: None,
        };

        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(json["raw_text"], "scribble");
        assert!(json["name"].is_null(), "Absent name should be null");
        assert!(json["mrp"].is_null(), "Absent mrp should be null");
        assert!(json["sell_price"].is_null(), "Absent sell_price should be null");
    }

    #[test]
    fn test_field_names_match_api_contract() {
        let extraction = TagExtraction {
            raw_text: "Soap\nMRP 120".to_string(),
            name: Some("Soap".to_string()),
            mrp: Some(120.0),
            sell_price: Some(99.0),
        };

        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(json["name"], "Soap");
        assert_eq!(json["mrp"], 120.0);
        assert_eq!(json["sell_price"], 99.0);
    }
}
