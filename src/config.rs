//! Configuration loading for chainpulse.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Get the chainpulse home directory (~/.chainpulse).
pub fn get_home_dir() -> Result<PathBuf> {
    let home = directories::UserDirs::new()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

    Ok(home.home_dir().join(".chainpulse"))
}

/// Get the settings file path.
pub fn get_settings_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join("settings.json"))
}

/// Load settings from ~/.chainpulse/settings.json
pub fn load_settings() -> Result<Settings> {
    let path = get_settings_path()?;

    if !path.exists() {
        return Err(Error::Config(format!(
            "Settings file not found at {}. Create it or rely on environment variables.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = serde_json::from_str(&content)?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Load settings or return default if not found.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {}, using defaults", e);
        Settings::default()
    })
}

/// Telegram channel configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,

    /// Broadcast destination for scheduled posts (`@channel` or a chat id).
    pub broadcast_chat: Option<String>,

    /// Group whose new members receive a welcome DM.
    pub greeting_chat: Option<i64>,
}

/// Channels configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Channels {
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Provider model configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProviderModel {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Models configuration.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Models {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub openai: ProviderModel,
}

fn default_provider() -> String {
    "openai".to_string()
}

impl Default for Models {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            openai: ProviderModel::default(),
        }
    }
}

/// Weather lookup configuration.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_city")]
    pub default_city: String,
}

fn default_city() -> String {
    "Sofia".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: default_city(),
        }
    }
}

/// Market data configuration.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MarketConfig {
    /// TTL of the cached price message, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Fixed delay before a cache-refreshing price fetch, in seconds.
    #[serde(default = "default_prefetch_delay_secs")]
    pub prefetch_delay_secs: u64,

    /// Surge alert threshold as a fraction (0.05 = 5%).
    #[serde(default = "default_surge_threshold")]
    pub surge_threshold: f64,

    /// Asset id watched by the surge monitor.
    #[serde(default = "default_surge_asset")]
    pub surge_asset: String,

    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    pub base_url: Option<String>,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_prefetch_delay_secs() -> u64 {
    5
}

fn default_surge_threshold() -> f64 {
    0.05
}

fn default_surge_asset() -> String {
    "ethereum".to_string()
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            prefetch_delay_secs: default_prefetch_delay_secs(),
            surge_threshold: default_surge_threshold(),
            surge_asset: default_surge_asset(),
            vs_currency: default_vs_currency(),
            base_url: None,
        }
    }
}

/// Web API configuration.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WebConfig {
    #[serde(default = "default_web_port")]
    pub port: u16,
}

fn default_web_port() -> u16 {
    3000
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
        }
    }
}

/// chainpulse settings.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub channels: Channels,

    #[serde(default)]
    pub models: Models,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default)]
    pub web: WebConfig,

    /// Appended to the sentiment idea line when present.
    pub tips_address: Option<String>,
}

impl Settings {
    /// Bot token from settings, falling back to `TELEGRAM_TOKEN`.
    pub fn telegram_token(&self) -> Option<String> {
        self.channels
            .telegram
            .bot_token
            .clone()
            .or_else(|| std::env::var("TELEGRAM_TOKEN").ok())
    }

    /// Weather API key from settings, falling back to `OPENWEATHER_API_KEY`.
    pub fn weather_api_key(&self) -> Option<String> {
        self.weather
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_configuration() {
        let settings = Settings::default();
        assert_eq!(settings.market.cache_ttl_secs, 300);
        assert_eq!(settings.market.prefetch_delay_secs, 5);
        assert_eq!(settings.market.surge_threshold, 0.05);
        assert_eq!(settings.market.surge_asset, "ethereum");
        assert_eq!(settings.weather.default_city, "Sofia");
        assert_eq!(settings.web.port, 3000);
        assert_eq!(settings.models.provider, "openai");
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{"channels":{"telegram":{"bot_token":"t","broadcast_chat":"@lab"}},
                "market":{"surge_threshold":0.1}}"#,
        )
        .unwrap();
        assert_eq!(settings.channels.telegram.bot_token.as_deref(), Some("t"));
        assert_eq!(settings.market.surge_threshold, 0.1);
        assert_eq!(settings.market.cache_ttl_secs, 300);
        assert_eq!(settings.weather.default_city, "Sofia");
    }
}
