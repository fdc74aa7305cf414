//! CryptoCompare news client.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

const CRYPTOCOMPARE_BASE: &str = "https://min-api.cryptocompare.com";

/// Latest headline with its link.
#[derive(Debug, Clone, Deserialize)]
pub struct Headline {
    pub title: String,
    pub url: String,
}

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(rename = "Data")]
    data: Vec<Headline>,
}

pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    pub fn new() -> Self {
        Self::with_base_url(CRYPTOCOMPARE_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Most recent headline for the given language.
    pub async fn latest_headline(&self, lang: &str) -> Result<Headline> {
        let url = format!("{}/data/v2/news/?lang={}", self.base_url, lang);
        let response: NewsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| Error::Format(e.to_string()))?;

        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Format("empty news feed".to_string()))
    }
}

impl Default for NewsClient {
    fn default() -> Self {
        Self::new()
    }
}
