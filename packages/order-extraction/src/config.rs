use anyhow::{Context, Result};
use dotenvy::dotenv;
use gemini_client::GeminiClient;
use secrecy::{ExposeSecret, SecretBox};
use std::env;
use tracing::warn;

use crate::extractor::{OrderExtractor, DEFAULT_MODEL};
use crate::traits::StructuredExtractor;

/// Extractor configuration loaded from environment variables
#[derive(Debug)]
pub struct ExtractorConfig {
    pub api_key: SecretBox<str>,
    pub model: String,
    pub base_url: Option<String>,
    pub grand_total_marker: Option<String>,
}

impl ExtractorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// A missing API key is not an error: the first extraction fails instead.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .unwrap_or_else(|| {
                warn!("GEMINI_API_KEY is not set; extraction requests will be rejected");
                String::new()
            });

        let base_url = lookup("GEMINI_BASE_URL")
            .map(|raw| {
                url::Url::parse(&raw)
                    .map(|_| raw.clone())
                    .with_context(|| format!("GEMINI_BASE_URL must be a valid URL, got {raw}"))
            })
            .transpose()?;

        Ok(Self {
            api_key: SecretBox::new(Box::from(api_key.as_str())),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
            grand_total_marker: lookup("ORDER_GRAND_TOTAL_MARKER"),
        })
    }

    /// Construct the Gemini client described by this configuration.
    pub fn gemini_client(&self) -> GeminiClient {
        let client = GeminiClient::new(self.api_key.expose_secret());
        match &self.base_url {
            Some(url) => client.with_base_url(url.as_str()),
            None => client,
        }
    }

    /// Construct an extractor backed by Gemini.
    pub fn build_extractor(&self) -> OrderExtractor<GeminiClient> {
        self.extractor_with(self.gemini_client())
    }

    /// Construct an extractor with this configuration's model and marker
    /// over any backend.
    pub fn extractor_with<E: StructuredExtractor>(&self, backend: E) -> OrderExtractor<E> {
        let extractor = OrderExtractor::new(backend).with_model(self.model.as_str());
        match &self.grand_total_marker {
            Some(marker) => extractor.with_grand_total_marker(marker.as_str()),
            None => extractor,
        }
    }
}
