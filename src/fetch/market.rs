//! CoinGecko market data client.

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

const COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";

/// One row of a markets listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketEntry {
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Parameters for a markets listing.
#[derive(Debug, Clone)]
pub struct MarketsQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub category: Option<String>,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: 20,
            page: 1,
            category: None,
        }
    }
}

#[derive(Deserialize)]
struct MarketChart {
    prices: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct CoinDetail {
    market_data: CoinMarketData,
}

#[derive(Deserialize)]
struct CoinMarketData {
    price_change_percentage_24h: Option<f64>,
}

/// CoinGecko client.
pub struct MarketClient {
    client: Client,
    base_url: String,
}

impl MarketClient {
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Spot prices in `vs` currency for the given asset ids.
    pub async fn spot_prices(&self, ids: &[&str], vs: &str) -> Result<HashMap<String, f64>> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            ids.join(","),
            vs
        );
        let response: HashMap<String, HashMap<String, f64>> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| Error::Format(e.to_string()))?;

        let mut prices = HashMap::new();
        for id in ids {
            let price = response
                .get(*id)
                .and_then(|currencies| currencies.get(vs))
                .copied()
                .ok_or_else(|| Error::Format(format!("no {} price for {}", vs, id)))?;
            prices.insert((*id).to_string(), price);
        }
        Ok(prices)
    }

    /// Spot price of one asset.
    pub async fn spot_price(&self, id: &str, vs: &str) -> Result<f64> {
        let prices = self.spot_prices(&[id], vs).await?;
        prices
            .get(id)
            .copied()
            .ok_or_else(|| Error::Format(format!("no price for {}", id)))
    }

    /// Price series of `[timestamp, price]` pairs over the given day span.
    pub async fn market_chart(&self, id: &str, vs: &str, days: u32) -> Result<Vec<[f64; 2]>> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url, id, vs, days
        );
        let chart: MarketChart = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| Error::Format(e.to_string()))?;
        Ok(chart.prices)
    }

    /// 24-hour change percentage from the coin detail endpoint.
    pub async fn change_24h(&self, id: &str) -> Result<f64> {
        let url = format!("{}/coins/{}", self.base_url, id);
        let detail: CoinDetail = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| Error::Format(e.to_string()))?;
        detail
            .market_data
            .price_change_percentage_24h
            .ok_or_else(|| Error::Format(format!("no 24h change for {}", id)))
    }

    /// Top markets by capitalization, optionally filtered by category.
    pub async fn markets(&self, query: &MarketsQuery) -> Result<Vec<MarketEntry>> {
        let mut url = format!(
            "{}/coins/markets?vs_currency={}&order={}&per_page={}&page={}&sparkline=false",
            self.base_url, query.vs_currency, query.order, query.per_page, query.page
        );
        if let Some(category) = &query.category {
            url.push_str(&format!("&category={}", category));
        }
        let entries: Vec<MarketEntry> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| Error::Format(e.to_string()))?;
        Ok(entries)
    }
}

impl Default for MarketClient {
    fn default() -> Self {
        Self::new()
    }
}
