//! Gemini implementation of [`StructuredExtractor`].

use async_trait::async_trait;
use gemini_client::GeminiClient;

use crate::error::InferenceError;
use crate::traits::{InferenceRequest, StructuredExtractor};

#[async_trait]
impl StructuredExtractor for GeminiClient {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, InferenceError> {
        self.structured_output(
            request.model,
            request.system_instruction,
            request.prompt,
            request.schema.clone(),
        )
        .await
        .map_err(InferenceError::backend)
    }
}
