use serde::{Deserialize, Serialize};

/// A single line item on a bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillItem {
    pub name: String,
    pub quantity: u32,
    /// Price actually charged per unit
    pub price: f64,
    /// Listed price, when the tag carried one
    #[serde(default)]
    pub mrp: Option<f64>,
}

/// A customer bill assembled from scanned price tags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    #[serde(default)]
    pub customer_name: Option<String>,
    pub items: Vec<BillItem>,
    pub total: f64,
}

/// A bill as persisted by the store, with its assigned id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredBill {
    pub id: u64,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
    #[serde(flatten)]
    pub bill: Bill,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_deserializes_without_optional_fields() {
        let json = r#"{"items": [{"name": "Soap", "quantity": 2, "price": 45.0}], "total": 90.0}"#;
        let bill: Bill = serde_json::from_str(json).expect("minimal bill should deserialize");

        assert!(bill.customer_name.is_none());
        assert_eq!(bill.items.len(), 1);
        assert!(bill.items[0].mrp.is_none());
        assert_eq!(bill.total, 90.0);
    }

    #[test]
    fn test_stored_bill_flattens_bill_fields() {
        let stored = StoredBill {
            id: 7,
            created_at: 1_700_000_000_000,
            bill: Bill {
                customer_name: Some("Asha".to_string()),
                items: vec![],
                total: 0.0,
            },
        };

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["customer_name"], "Asha", "Bill fields should flatten to the top level");
        assert_eq!(json["total"], 0.0);
    }
}
