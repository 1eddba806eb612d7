//! The fixed response schema sent with every extraction.

use std::sync::LazyLock;

use gemini_client::StructuredOutput;
use serde_json::Value;

use crate::types::ExtractedOrder;

static EXTRACTION_SCHEMA: LazyLock<Value> = LazyLock::new(ExtractedOrder::gemini_schema);

/// Response schema for [`ExtractedOrder`], built once per process.
pub fn extraction_schema() -> &'static Value {
    &EXTRACTION_SCHEMA
}
