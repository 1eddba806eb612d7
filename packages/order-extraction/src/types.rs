//! Extracted order data.
//!
//! Field doc comments double as the descriptions sent to the model in the
//! response schema, so they are written for the model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Order information extracted from a spreadsheet export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedOrder {
    /// The main title or identifier for the order (e.g., '15468 - BHX_DNA_TKH - 8 Thái Thị Bôi'). Can be an empty string if not found, especially for summary files.
    #[serde(default)]
    pub order_title: String,

    /// A list of all items in the order.
    pub items: Vec<OrderItem>,

    /// The requested delivery date (e.g., '31/07/2025'). Can be an empty string if not found.
    #[serde(default)]
    pub delivery_date: String,

    /// Information about the recipient.
    pub shipping_info: ShippingInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrderItem {
    /// The name of the item.
    pub name: String,

    // `Number` rather than `f64` so `2` is returned as `2`, not `2.0`.
    /// The quantity of the item.
    pub quantity: Number,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShippingInfo {
    /// The FULL recipient string, including any ID and phone number (SĐT). Example: '26178 - Nguyễn Tấn Anh / SĐT: 0825979194'.
    pub recipient: String,

    /// The full delivery address.
    pub address: String,
}

impl ExtractedOrder {
    /// Sum of all item quantities.
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().filter_map(|item| item.quantity.as_f64()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_round_trip() {
        let value = json!({
            "orderTitle": "15468 - BHX_DNA_TKH - 8 Thái Thị Bôi",
            "items": [{"name": "Máy in", "quantity": 2}, {"name": "Giấy in", "quantity": 0.5}],
            "deliveryDate": "31/07/2025",
            "shippingInfo": {
                "recipient": "26178 - Nguyễn Tấn Anh / SĐT: 0825979194",
                "address": "8 Thái Thị Bôi, Đà Nẵng"
            }
        });

        let order: ExtractedOrder = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(order.items[0].name, "Máy in");
        assert_eq!(order.items[0].quantity, Number::from(2));
        assert_eq!(order.total_quantity(), 2.5);
        assert_eq!(serde_json::to_value(&order).unwrap(), value);
        assert!(serde_json::to_string(&order).unwrap().contains(r#""quantity":2}"#));
    }

    #[test]
    fn test_missing_title_and_date_default_to_empty() {
        let order: ExtractedOrder = serde_json::from_value(json!({
            "items": [],
            "shippingInfo": {"recipient": "", "address": ""}
        }))
        .unwrap();

        assert_eq!(order.order_title, "");
        assert_eq!(order.delivery_date, "");
        assert_eq!(order.shipping_info, ShippingInfo::default());
    }

    #[test]
    fn test_non_numeric_quantity_is_rejected() {
        let result = serde_json::from_value::<ExtractedOrder>(json!({
            "items": [{"name": "Máy in", "quantity": "two"}],
            "shippingInfo": {"recipient": "", "address": ""}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_recipient_is_required() {
        let result = serde_json::from_value::<ExtractedOrder>(json!({
            "items": [],
            "shippingInfo": {"address": "somewhere"}
        }));
        assert!(result.is_err());
    }
}
