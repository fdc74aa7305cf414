//! OpenWeatherMap client.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

const OPENWEATHER_BASE: &str = "https://api.openweathermap.org";

/// Current conditions for a city, metric units.
#[derive(Debug, Clone)]
pub struct Conditions {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub description: String,
}

#[derive(Deserialize)]
struct WeatherResponse {
    main: MainBlock,
    weather: Vec<DescriptionBlock>,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Deserialize)]
struct DescriptionBlock {
    description: String,
}

pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: OPENWEATHER_BASE.to_string(),
        }
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Current conditions for `city` in metric units.
    pub async fn current(&self, city: &str) -> Result<Conditions> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Fetch("OPENWEATHER_API_KEY not set".to_string()))?;

        let url = format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric",
            self.base_url, city, api_key
        );
        let response: WeatherResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| Error::Format(e.to_string()))?;

        let description = response
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| Error::Format("weather response had no description".to_string()))?;

        Ok(Conditions {
            temp: response.main.temp,
            feels_like: response.main.feels_like,
            humidity: response.main.humidity,
            description,
        })
    }
}
