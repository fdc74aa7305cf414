//! Language-model provider trait.
#![allow(dead_code)]

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Completion provider used as the fallback for unclassified queries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name.
    fn name(&self) -> &str;

    /// Check if the provider is configured.
    async fn is_available(&self) -> bool;

    /// Complete a user message under a system instruction.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Get the default model.
    fn default_model(&self) -> Option<&str>;
}
