//! Capability trait for schema-constrained remote inference.
//!
//! The interpretation of the spreadsheet text happens entirely inside the
//! remote model. The extractor only needs something that takes a prompt plus
//! a schema and hands back JSON text, so that is all this trait asks for.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::InferenceError;

/// One schema-constrained inference call.
#[derive(Debug, Clone, Copy)]
pub struct InferenceRequest<'a> {
    /// Model identifier (e.g. "gemini-2.5-flash")
    pub model: &'a str,

    /// System-level behavioral directive
    pub system_instruction: &'a str,

    /// Instruction with the raw table embedded
    pub prompt: &'a str,

    /// Response schema the output must follow
    pub schema: &'a Value,
}

/// Structured inference capability.
///
/// Implementations return the raw response text untouched; empty text and
/// non-JSON text are the caller's problem.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, InferenceError>;
}

#[async_trait]
impl<T: StructuredExtractor + ?Sized> StructuredExtractor for Arc<T> {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, InferenceError> {
        (**self).infer(request).await
    }
}

#[async_trait]
impl<T: StructuredExtractor + ?Sized> StructuredExtractor for Box<T> {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, InferenceError> {
        (**self).infer(request).await
    }
}
