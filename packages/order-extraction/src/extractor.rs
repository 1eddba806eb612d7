//! The order extractor.
//!
//! One remote call per extraction, followed by three structural checks:
//! the response text is non-empty, the parsed object carries `shippingInfo`,
//! and `items` is an array. The typed [`ExtractedOrder`] is then materialized
//! from the checked value. Quantities, recipients and the like are taken as
//! the model returned them.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ExtractionError, FailureKind, Result};
use crate::prompts::{format_extract_order_prompt, DEFAULT_GRAND_TOTAL_MARKER, SYSTEM_INSTRUCTION};
use crate::schema::extraction_schema;
use crate::traits::{InferenceRequest, StructuredExtractor};
use crate::types::ExtractedOrder;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Extracts orders from spreadsheet-exported text.
///
/// Stateless apart from its settings; share it freely across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gemini_client::GeminiClient;
/// use order_extraction::OrderExtractor;
///
/// let extractor = OrderExtractor::new(GeminiClient::from_env()?);
/// let order = extractor.extract(&csv_text).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderExtractor<E> {
    backend: E,
    model: String,
    grand_total_marker: String,
}

impl<E: StructuredExtractor> OrderExtractor<E> {
    pub fn new(backend: E) -> Self {
        Self {
            backend,
            model: DEFAULT_MODEL.to_string(),
            grand_total_marker: DEFAULT_GRAND_TOTAL_MARKER.to_string(),
        }
    }

    /// Set the model identifier passed to the backend.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the row label that marks a summary sheet.
    pub fn with_grand_total_marker(mut self, marker: impl Into<String>) -> Self {
        self.grand_total_marker = marker.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn grand_total_marker(&self) -> &str {
        &self.grand_total_marker
    }

    pub fn backend(&self) -> &E {
        &self.backend
    }

    /// Extract an order from `raw_table`.
    ///
    /// Every failure collapses into [`ExtractionError::Failed`]; the
    /// underlying cause is logged, not returned.
    pub async fn extract(&self, raw_table: &str) -> Result<ExtractedOrder> {
        match self.try_extract(raw_table).await {
            Ok(order) => {
                debug!(
                    model = %self.model,
                    items = order.items.len(),
                    has_title = !order.order_title.is_empty(),
                    "Extracted order"
                );
                Ok(order)
            }
            Err(failure) => {
                error!(
                    model = %self.model,
                    kind = failure.label(),
                    error = %failure,
                    "Order extraction failed"
                );
                Err(ExtractionError::Failed)
            }
        }
    }

    async fn try_extract(&self, raw_table: &str) -> std::result::Result<ExtractedOrder, FailureKind> {
        let prompt = format_extract_order_prompt(raw_table, &self.grand_total_marker);
        let request = InferenceRequest {
            model: &self.model,
            system_instruction: SYSTEM_INSTRUCTION,
            prompt: &prompt,
            schema: extraction_schema(),
        };

        debug!(
            model = %self.model,
            input_len = raw_table.len(),
            prompt_len = prompt.len(),
            "Requesting order extraction"
        );

        let text = self.backend.infer(&request).await?;
        parse_order(&text)
    }
}

/// Apply the structural checks to raw response text.
pub(crate) fn parse_order(text: &str) -> std::result::Result<ExtractedOrder, FailureKind> {
    if text.trim().is_empty() {
        return Err(FailureKind::EmptyResponse);
    }

    let value: Value = serde_json::from_str(text).map_err(FailureKind::MalformedJson)?;

    match value.get("shippingInfo") {
        None | Some(Value::Null) => return Err(FailureKind::MissingShippingInfo),
        Some(_) => {}
    }

    if !value.get("items").is_some_and(Value::is_array) {
        return Err(FailureKind::ItemsNotArray);
    }

    serde_json::from_value(value).map_err(FailureKind::Shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_ORDER: &str = r#"{"orderTitle":"","items":[],"deliveryDate":"","shippingInfo":{"recipient":"","address":""}}"#;

    #[test]
    fn test_parse_empty_order() {
        let order = parse_order(EMPTY_ORDER).unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.shipping_info.recipient, "");
        assert_eq!(order.shipping_info.address, "");
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(matches!(parse_order(""), Err(FailureKind::EmptyResponse)));
        assert!(matches!(parse_order("  \n\t"), Err(FailureKind::EmptyResponse)));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_order("not json"),
            Err(FailureKind::MalformedJson(_))
        ));
    }

    #[test]
    fn test_missing_or_null_shipping_info() {
        assert!(matches!(
            parse_order(r#"{"items":[]}"#),
            Err(FailureKind::MissingShippingInfo)
        ));
        assert!(matches!(
            parse_order(r#"{"items":[],"shippingInfo":null}"#),
            Err(FailureKind::MissingShippingInfo)
        ));
        // Non-object JSON has no fields at all
        assert!(matches!(
            parse_order("[1, 2]"),
            Err(FailureKind::MissingShippingInfo)
        ));
    }

    #[test]
    fn test_items_must_be_array() {
        let shipping = r#""shippingInfo":{"recipient":"a","address":"b"}"#;

        assert!(matches!(
            parse_order(&format!(r#"{{"items":"not-an-array",{}}}"#, shipping)),
            Err(FailureKind::ItemsNotArray)
        ));
        assert!(matches!(
            parse_order(&format!(r#"{{{}}}"#, shipping)),
            Err(FailureKind::ItemsNotArray)
        ));
    }

    #[test]
    fn test_shape_violation_after_structural_checks() {
        let text = r#"{"items":[{"name":"Máy in","quantity":"two"}],"shippingInfo":{"recipient":"a","address":"b"}}"#;
        assert!(matches!(parse_order(text), Err(FailureKind::Shape(_))));

        let text = r#"{"items":[],"shippingInfo":{"address":"b"}}"#;
        assert!(matches!(parse_order(text), Err(FailureKind::Shape(_))));
    }

    #[test]
    fn test_failure_labels() {
        assert_eq!(FailureKind::EmptyResponse.label(), "empty_response");
        assert_eq!(FailureKind::ItemsNotArray.label(), "items_not_array");
    }
}
