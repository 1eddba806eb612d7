//! Testing utilities including a mock inference backend.
//!
//! Useful for testing applications that use the extractor without making
//! real model calls.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::InferenceError;
use crate::traits::{InferenceRequest, StructuredExtractor};

/// A mock [`StructuredExtractor`] that replays canned responses in order.
///
/// Clones share the same queue and call log. When the queue runs dry every
/// further call fails.
#[derive(Clone, Default)]
pub struct MockExtractor {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Text(String),
    Failure(String),
}

/// Owned copy of an [`InferenceRequest`] seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub schema: Value,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response text.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push_response(text);
        self
    }

    /// Queue a backend failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push_failure(message);
        self
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Text(text.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Failure(message.into()));
    }

    /// All requests seen so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl StructuredExtractor for MockExtractor {
    async fn infer(&self, request: &InferenceRequest<'_>) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            system_instruction: request.system_instruction.to_string(),
            prompt: request.prompt.to_string(),
            schema: request.schema.clone(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Failure(message)) => Err(InferenceError::backend(message)),
            None => Err(InferenceError::backend("no mock response queued")),
        }
    }
}
