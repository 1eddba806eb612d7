//! Typed errors for order extraction.
//!
//! Callers only ever see [`ExtractionError::Failed`]. The detailed
//! [`FailureKind`] is logged at the component boundary and dropped.

use thiserror::Error;

/// Result type for order extraction.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// The single caller-visible extraction failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    /// Any remote, parse or shape failure
    #[error("Failed to extract order information. Please check the file format and try again.")]
    Failed,
}

/// Error returned by a [`StructuredExtractor`](crate::StructuredExtractor) backend.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Backend call failed (network, non-2xx, quota, missing credential)
    #[error("inference backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl InferenceError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Internal failure taxonomy, logged but never returned.
#[derive(Debug, Error)]
pub(crate) enum FailureKind {
    #[error("remote inference failed: {0}")]
    Remote(#[from] InferenceError),

    #[error("remote service returned an empty response")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("response is missing shippingInfo")]
    MissingShippingInfo,

    #[error("response items is not an array")]
    ItemsNotArray,

    #[error("response does not match the order shape: {0}")]
    Shape(#[source] serde_json::Error),
}

impl FailureKind {
    /// Short label for structured logs.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            FailureKind::Remote(_) => "remote",
            FailureKind::EmptyResponse => "empty_response",
            FailureKind::MalformedJson(_) => "malformed_json",
            FailureKind::MissingShippingInfo => "missing_shipping_info",
            FailureKind::ItemsNotArray => "items_not_array",
            FailureKind::Shape(_) => "shape",
        }
    }
}
