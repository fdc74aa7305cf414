//! The dispatch engine.
//!
//! Composition root: owns the TTL cache and the surge monitor for the
//! process lifetime, wires every trigger (scheduled tick or inbound text)
//! to its handler, and forwards payloads to the transport. Every fetch
//! failure is recovered here with a fixed fallback string; nothing below
//! this layer sends anything.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::time::sleep;

use crate::cache::PriceCache;
use crate::config::Settings;
use crate::content::catalogs::{
    pick, BLOOD_MOON_EVENT, BLOOD_MOON_INFO, COMMAND_POLL_QUESTION, DAILY_POLL_QUESTION,
    EDUCATIONAL, GAME_CHALLENGES, MEMES, POLL_OPTIONS, SCAM_WARNINGS, STORIES, TRADING_TIPS,
};
use crate::content::market as content;
use crate::content::weather::weather_message;
use crate::core::{classify, route, Command, Intent, Route};
use crate::error::{Error, Result};
use crate::fetch::charts::pie_chart_url;
use crate::fetch::{MarketClient, MarketsQuery, NewsClient, WeatherClient};
use crate::providers::{create_provider, Provider};
use crate::scheduler::JobKind;
use crate::surge::SurgeMonitor;
use crate::telegram::{Target, Transport};

const AI_FALLBACK: &str = "Sorry, I couldn't process your question right now.";
const NEWS_FALLBACK: &str = "No news available at the moment.";
const TOP_FALLBACK: &str = "Unable to fetch top 20 cryptocurrencies.";
const TOP_MEME_FALLBACK: &str = "Unable to fetch top 20 meme coins.";
const ANALYSIS_FALLBACK: &str = "📈 Market Analysis: Couldn't fetch Bitcoin data today.";
const FORECAST_FALLBACK: &str = "Couldn't generate a market prediction right now.";
const WEATHER_FALLBACK: &str = "Couldn't fetch weather data.";

pub const USAGE_NOTICE: &str = "Type /analyze [coin], /levels [coin], /poll, or /bloodmoon";

pub struct Dispatcher {
    settings: Settings,
    transport: Arc<dyn Transport>,
    provider: Arc<dyn Provider>,
    market: MarketClient,
    news: NewsClient,
    weather: WeatherClient,
    price_cache: PriceCache,
    surge: SurgeMonitor,
}

fn stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

fn poll_options() -> Vec<String> {
    POLL_OPTIONS.iter().map(|option| option.to_string()).collect()
}

fn fallback_system_prompt(stamp: &str) -> String {
    format!(
        "You are a helpful AI that responds in the same language as the question asked. \
         Today's date is {}. If you don't have real-time data, say so and suggest where to find it.",
        stamp
    )
}

impl Dispatcher {
    pub fn new(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        let market = match &settings.market.base_url {
            Some(base_url) => MarketClient::with_base_url(base_url.clone()),
            None => MarketClient::new(),
        };
        let weather = WeatherClient::new(settings.weather_api_key());
        let provider = create_provider(&settings);
        let price_cache = PriceCache::new(Duration::from_secs(settings.market.cache_ttl_secs));
        let surge = SurgeMonitor::new(settings.market.surge_threshold);

        Self {
            settings,
            transport,
            provider,
            market,
            news: NewsClient::new(),
            weather,
            price_cache,
            surge,
        }
    }

    /// Run one scheduled job to completion.
    pub async fn run_job(&self, job: JobKind) -> Result<()> {
        match job {
            JobKind::News => {
                let text = self.news_message().await;
                self.broadcast_text(&text).await
            }
            JobKind::Prices => {
                let text = self.cached_prices().await;
                self.broadcast_text(&text).await
            }
            JobKind::SurgeCheck => self.surge_check().await,
            JobKind::BloodMoonEvent => self.broadcast_text(BLOOD_MOON_EVENT).await,
            JobKind::Meme => {
                let meme = pick(MEMES);
                self.transport
                    .send_photo(&Target::Broadcast, meme.photo_url, meme.caption)
                    .await
            }
            JobKind::TopCryptos => {
                let text = self.top_markets_message(None).await;
                self.broadcast_text(&text).await
            }
            JobKind::TopMemeCoins => {
                let text = self.top_markets_message(Some("meme-token")).await;
                self.broadcast_text(&text).await
            }
            JobKind::MarketAnalysis => {
                let text = self.market_analysis().await;
                self.broadcast_text(&text).await
            }
            JobKind::Educational => self.broadcast_text(pick(EDUCATIONAL)).await,
            JobKind::DailyPoll => {
                self.transport
                    .send_poll(&Target::Broadcast, DAILY_POLL_QUESTION, &poll_options())
                    .await
            }
            JobKind::ScamWarning => self.broadcast_text(pick(SCAM_WARNINGS)).await,
            JobKind::GameChallenge => self.broadcast_text(pick(GAME_CHALLENGES)).await,
            JobKind::Story => self.broadcast_text(pick(STORIES)).await,
            JobKind::TradingTip => self.broadcast_text(pick(TRADING_TIPS)).await,
            JobKind::Forecast => {
                let prediction = self.market_prediction().await;
                self.broadcast_text(&format!("📈 Daily Forecast:\n{}", prediction))
                    .await
            }
        }
    }

    /// Handle one inbound text: command table first, intent rules otherwise.
    pub async fn handle_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let target = Target::Chat(chat_id);
        match route(text) {
            Route::Command(command) => self.run_command(&target, command).await,
            Route::UnknownCommand => self.transport.send_text(&target, USAGE_NOTICE).await,
            Route::Text => {
                let reply = self.answer(text).await;
                self.transport
                    .send_text(&target, &format!("🤖 {}", reply))
                    .await
            }
        }
    }

    /// Greet members joining the configured group with a DM each.
    pub async fn handle_new_members(&self, chat_id: i64, members: &[(i64, String)]) {
        let Some(greeting_chat) = self.settings.channels.telegram.greeting_chat else {
            return;
        };
        if chat_id != greeting_chat {
            return;
        }

        let community = self
            .settings
            .channels
            .telegram
            .broadcast_chat
            .clone()
            .unwrap_or_else(|| "the community".to_string());

        for (user_id, first_name) in members {
            let welcome = format!(
                "Hello, {}! Welcome to {}! Here you'll find crypto news, analysis, and more!",
                first_name, community
            );
            if let Err(e) = self.transport.send_text(&Target::Chat(*user_id), &welcome).await {
                tracing::warn!("Couldn't send welcome DM to {}: {}", first_name, e);
            }
        }
    }

    async fn run_command(&self, target: &Target, command: Command) -> Result<()> {
        match command {
            Command::Analyze { symbol } => {
                let idea =
                    content::sentiment_idea(&symbol, self.settings.tips_address.as_deref());
                self.transport.send_text(target, &idea).await?;

                let breakdown = content::sentiment_breakdown(&symbol);
                let chart = content::sentiment_chart(&symbol, &breakdown);
                let url = pie_chart_url(&chart)?;
                self.transport.send_photo(target, url.as_str(), "").await
            }
            Command::Levels { symbol } => {
                self.transport
                    .send_text(target, &content::levels_message(&symbol))
                    .await
            }
            Command::Poll => {
                self.transport
                    .send_poll(target, COMMAND_POLL_QUESTION, &poll_options())
                    .await
            }
            Command::BloodMoon => self.transport.send_text(target, BLOOD_MOON_INFO).await,
        }
    }

    /// Answer a free-form query through the intent rules.
    pub async fn answer(&self, text: &str) -> String {
        match classify(text, &self.settings.weather.default_city) {
            Intent::Price => {
                format!("Here are the current prices: {}", self.cached_prices().await)
            }
            Intent::TopList => format!(
                "Here are the top 20 cryptocurrencies: {}",
                self.top_markets_message(None).await
            ),
            Intent::Weather { city } => {
                format!("Here's the weather: {}", self.weather_report(&city).await)
            }
            Intent::Forecast => self.market_prediction().await,
            Intent::Generic => {
                let system = fallback_system_prompt(&stamp());
                match self.provider.complete(&system, text).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::error!("Provider completion failed: {}", e);
                        AI_FALLBACK.to_string()
                    }
                }
            }
        }
    }

    /// The cached BTC/ETH price message.
    pub async fn cached_prices(&self) -> String {
        let delay = Duration::from_secs(self.settings.market.prefetch_delay_secs);
        let vs = self.settings.market.vs_currency.clone();
        let market = &self.market;

        self.price_cache
            .get_or_fetch(|| async move {
                // Fixed pause before each refresh keeps us under the
                // provider's public rate limit.
                sleep(delay).await;
                let prices = market.spot_prices(&["bitcoin", "ethereum"], &vs).await?;
                let btc = prices
                    .get("bitcoin")
                    .copied()
                    .ok_or_else(|| Error::Format("missing bitcoin price".to_string()))?;
                let eth = prices
                    .get("ethereum")
                    .copied()
                    .ok_or_else(|| Error::Format("missing ethereum price".to_string()))?;
                Ok(content::price_message(btc, eth, &stamp()))
            })
            .await
    }

    /// The market prediction narrative.
    pub async fn market_prediction(&self) -> String {
        match self.prediction_inputs().await {
            Ok(inputs) => content::market_prediction("bitcoin", "Bitcoin", &inputs),
            Err(e) => {
                tracing::warn!("Prediction fetch failed: {}", e);
                FORECAST_FALLBACK.to_string()
            }
        }
    }

    async fn prediction_inputs(&self) -> Result<content::PredictionInputs> {
        let vs = &self.settings.market.vs_currency;
        let series = self.market.market_chart("bitcoin", vs, 7).await?;
        let (current_price, week_average) = content::week_average(&series)
            .ok_or_else(|| Error::Format("empty price series".to_string()))?;
        let change_24h = self.market.change_24h("bitcoin").await?;
        Ok(content::PredictionInputs {
            current_price,
            week_average,
            change_24h,
        })
    }

    async fn news_message(&self) -> String {
        match self.news.latest_headline("EN").await {
            Ok(headline) => format!("📰 {}\n{}", headline.title, headline.url),
            Err(e) => {
                tracing::warn!("News fetch failed: {}", e);
                NEWS_FALLBACK.to_string()
            }
        }
    }

    async fn top_markets_message(&self, category: Option<&str>) -> String {
        let query = MarketsQuery {
            vs_currency: self.settings.market.vs_currency.clone(),
            category: category.map(str::to_string),
            ..Default::default()
        };
        match self.market.markets(&query).await {
            Ok(coins) => {
                let heading = if category.is_some() {
                    "😂 Top 20 Meme Coins"
                } else {
                    "📊 Top 20 Cryptocurrencies"
                };
                content::top_markets_message(heading, &coins, &stamp())
            }
            Err(e) => {
                tracing::warn!("Markets fetch failed: {}", e);
                if category.is_some() {
                    TOP_MEME_FALLBACK.to_string()
                } else {
                    TOP_FALLBACK.to_string()
                }
            }
        }
    }

    async fn market_analysis(&self) -> String {
        match self.market.change_24h("bitcoin").await {
            Ok(change) => content::market_analysis_message(change, &stamp()),
            Err(e) => {
                tracing::warn!("Analysis fetch failed: {}", e);
                ANALYSIS_FALLBACK.to_string()
            }
        }
    }

    async fn weather_report(&self, city: &str) -> String {
        match self.weather.current(city).await {
            Ok(conditions) => weather_message(city, &conditions, &stamp()),
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                WEATHER_FALLBACK.to_string()
            }
        }
    }

    /// One surge-monitor cycle. The price fetch here is deliberately
    /// independent of the TTL cache: two call sites, two schedules.
    async fn surge_check(&self) -> Result<()> {
        let asset = self.settings.market.surge_asset.clone();
        let vs = self.settings.market.vs_currency.clone();
        let market = &self.market;

        let alert = self
            .surge
            .poll_with(|| async move { market.spot_price(&asset, &vs).await })
            .await?;

        if let Some(alert) = alert {
            let label = content::asset_label(&self.settings.market.surge_asset);
            self.broadcast_text(&content::surge_message(&alert, &label))
                .await?;
        }
        Ok(())
    }

    async fn broadcast_text(&self, text: &str) -> Result<()> {
        self.transport.send_text(&Target::Broadcast, text).await
    }
}
