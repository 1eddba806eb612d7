//! Order Extraction
//!
//! Turns loosely formatted spreadsheet exports (CSV text) into structured
//! orders: title, line items, delivery date, and shipping recipient/address.
//!
//! Interpretation is delegated to a remote model constrained by a fixed
//! response schema. This crate builds the prompt, makes the single call, and
//! checks the shape of what comes back. Any failure is reported as one
//! uniform [`ExtractionError`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_extraction::{ExtractorConfig, OrderExtractor};
//!
//! let extractor = ExtractorConfig::from_env()?.build_extractor();
//! let order = extractor.extract(&csv_text).await?;
//! println!("{} items for {}", order.items.len(), order.shipping_info.recipient);
//! ```
//!
//! # Testing
//!
//! ```rust,ignore
//! use order_extraction::{testing::MockExtractor, OrderExtractor};
//!
//! let mock = MockExtractor::new().with_response(r#"{"items":[],"shippingInfo":{...}}"#);
//! let extractor = OrderExtractor::new(mock.clone());
//! ```
//!
//! # Modules
//!
//! - [`extractor`] - The extraction flow and structural checks
//! - [`traits`] - The `StructuredExtractor` capability
//! - [`types`] - Extracted order data
//! - [`schema`] - The fixed response schema
//! - [`prompts`] - Prompt text
//! - [`config`] - Environment configuration
//! - [`testing`] - Mock backend for tests

pub mod config;
pub mod error;
pub mod extractor;
mod gemini;
pub mod prompts;
pub mod schema;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::ExtractorConfig;
pub use error::{ExtractionError, InferenceError, Result};
pub use extractor::{OrderExtractor, DEFAULT_MODEL};
pub use schema::extraction_schema;
pub use traits::{InferenceRequest, StructuredExtractor};
pub use types::{ExtractedOrder, OrderItem, ShippingInfo};

pub use gemini_client::GeminiClient;
