//! Language-model providers module.

use std::sync::Arc;

pub mod openai;
pub mod provider;

pub use provider::{Provider, ProviderError, Result};

use crate::config::Settings;

/// Provider factory.
pub fn create_provider(settings: &Settings) -> Arc<dyn Provider> {
    let name = settings.models.provider.as_str();
    if name != "openai" {
        tracing::warn!("Unknown provider '{}', falling back to openai", name);
    }
    Arc::new(openai::OpenAiProvider::from_settings(&settings.models.openai))
}
