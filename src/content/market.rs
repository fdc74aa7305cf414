//! Market content formatting.
//!
//! Pure functions over already-fetched data; all fetching and delivery lives
//! in the dispatch engine. Prices use grouped thousands separators and
//! percentages are rounded to two decimals.

use crate::fetch::charts::PieChart;
use crate::fetch::market::MarketEntry;
use crate::surge::{Direction, SurgeAlert};

/// Group a value with thousands separators, keeping up to two decimals.
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let int_part = cents / 100;
    let frac_cents = cents % 100;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && (int_part > 0 || frac_cents > 0) {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac_cents > 0 {
        out.push_str(&format!(".{:02}", frac_cents));
    }
    out
}

/// Short ticker label for a provider asset id.
pub fn asset_label(asset_id: &str) -> String {
    match asset_id {
        "bitcoin" => "BTC".to_string(),
        "ethereum" => "ETH".to_string(),
        other => other.to_uppercase(),
    }
}

/// Paired BTC/ETH spot-price post.
pub fn price_message(btc: f64, eth: f64, stamp: &str) -> String {
    format!(
        "📈 Current Prices ({}):\nBTC: ${} | ETH: ${}",
        stamp,
        format_thousands(btc),
        format_thousands(eth)
    )
}

/// Numbered top-markets post.
pub fn top_markets_message(heading: &str, coins: &[MarketEntry], stamp: &str) -> String {
    let mut message = format!("{} ({}):\n", heading, stamp);
    for (index, coin) in coins.iter().enumerate() {
        let price = coin
            .current_price
            .map(format_thousands)
            .unwrap_or_else(|| "N/A".to_string());
        let cap = coin
            .market_cap
            .map(format_thousands)
            .unwrap_or_else(|| "N/A".to_string());
        message.push_str(&format!(
            "{}. {}: ${} (Market Cap: ${})\n",
            index + 1,
            coin.symbol.to_uppercase(),
            price,
            cap
        ));
    }
    message
}

/// Daily 24h-change commentary.
pub fn market_analysis_message(change_24h: f64, stamp: &str) -> String {
    format!(
        "📈 Market Analysis ({}): Bitcoin {} by {:.2}% today - possible reason: new ETF or market volatility.",
        stamp,
        if change_24h > 0.0 { "rose" } else { "fell" },
        change_24h.abs()
    )
}

/// Surge alert line for the broadcast chat.
pub fn surge_message(alert: &SurgeAlert, label: &str) -> String {
    format!(
        "⚠️ {} {} {:.2}% in the last 30 min! Now at ${}.",
        label,
        match alert.direction {
            Direction::Rose => "surged",
            Direction::Fell => "dropped",
        },
        alert.percent.abs(),
        format_thousands(alert.current_price)
    )
}

/// Inputs to the prediction narrative.
#[derive(Debug, Clone, Copy)]
pub struct PredictionInputs {
    pub current_price: f64,
    pub week_average: f64,
    pub change_24h: f64,
}

/// Current price and arithmetic mean of the last seven samples of a price
/// series of `[timestamp, price]` pairs. `None` on an empty series.
pub fn week_average(prices: &[[f64; 2]]) -> Option<(f64, f64)> {
    let current = prices.last()?[1];
    let tail = &prices[prices.len().saturating_sub(7)..];
    let mean = tail.iter().map(|p| p[1]).sum::<f64>() / tail.len() as f64;
    Some((current, mean))
}

/// Three-way prediction narrative: the trend (price vs 7-day mean) either
/// confirms the 24h direction, or the combination is treated as neutral.
pub fn market_prediction(asset_id: &str, label: &str, inputs: &PredictionInputs) -> String {
    let current = format_thousands(inputs.current_price);
    let average = format_thousands(inputs.week_average);
    let bullish = inputs.current_price > inputs.week_average;

    let narrative = if bullish && inputs.change_24h > 0.0 {
        format!(
            "{} Forecast: The price (${}) is in a bullish trend. The 7-day average price is ${}. \
             Based on a 24-hour increase ({:.2}%), it's likely to rise in the short term.",
            label, current, average, inputs.change_24h
        )
    } else if !bullish && inputs.change_24h < 0.0 {
        format!(
            "{} Forecast: The price (${}) is in a bearish trend. The 7-day average price is ${}. \
             Based on a 24-hour drop ({:.2}%), it may continue to fall soon.",
            label, current, average, inputs.change_24h
        )
    } else {
        format!(
            "{} Forecast: The price (${}) is near the 7-day average (${}). The market is volatile \
             with a 24-hour change of {:.2}%. It's hard to predict a clear movement.",
            label, current, average, inputs.change_24h
        )
    };

    format!(
        "{}\n📊 Check more at https://www.coingecko.com/en/coins/{}",
        narrative, asset_id
    )
}

/// Static support/resistance levels.
#[derive(Debug, Clone, Copy)]
pub struct Levels {
    pub support: f64,
    pub resistance: f64,
}

/// Lookup keyed by ticker; unknown symbols have no levels.
pub fn support_resistance(symbol: &str) -> Option<Levels> {
    match symbol.to_uppercase().as_str() {
        "BTC" => Some(Levels {
            support: 73_000.0,
            resistance: 76_000.0,
        }),
        "ETH" => Some(Levels {
            support: 2_700.0,
            resistance: 2_900.0,
        }),
        _ => None,
    }
}

/// Reply for the levels command; `N/A` for unrecognized symbols.
pub fn levels_message(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    let (support, resistance) = match support_resistance(&upper) {
        Some(levels) => (
            format_thousands(levels.support),
            format_thousands(levels.resistance),
        ),
        None => ("N/A".to_string(), "N/A".to_string()),
    };
    format!(
        "🔍 {} Technical Analysis:\nSupport: ${} | Resistance: ${}",
        upper, support, resistance
    )
}

/// Fixed sentiment split used by the analyze command.
#[derive(Debug, Clone, Copy)]
pub struct SentimentBreakdown {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

pub fn sentiment_breakdown(_symbol: &str) -> SentimentBreakdown {
    SentimentBreakdown {
        positive: 60,
        neutral: 30,
        negative: 10,
    }
}

/// Idea line sent alongside the sentiment chart.
pub fn sentiment_idea(symbol: &str, tips_address: Option<&str>) -> String {
    let mut idea = format!("{}: 60% bullish sentiment - consider buying!", symbol);
    if let Some(address) = tips_address {
        idea.push_str(&format!(" Tips: {}", address));
    }
    idea
}

/// Pie-chart spec for the sentiment split.
pub fn sentiment_chart(symbol: &str, breakdown: &SentimentBreakdown) -> PieChart {
    PieChart {
        title: format!("{} Sentiment", symbol),
        labels: vec![
            "Positive".to_string(),
            "Neutral".to_string(),
            "Negative".to_string(),
        ],
        values: vec![breakdown.positive, breakdown.neutral, breakdown.negative],
        colors: vec![
            "#00FF00".to_string(),
            "#FFFF00".to_string(),
            "#FF0000".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(70_000.0), "70,000");
        assert_eq!(format_thousands(2_716.25), "2,716.25");
        assert_eq!(format_thousands(0.5), "0.50");
        assert_eq!(format_thousands(999.999), "1,000");
    }

    #[test]
    fn week_average_uses_last_seven_points() {
        let series: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 100.0 + i as f64]).collect();
        let (current, mean) = week_average(&series).unwrap();
        assert_eq!(current, 109.0);
        // Last seven values are 103..=109.
        assert!((mean - 106.0).abs() < 1e-9);
        assert!(week_average(&[]).is_none());
    }

    #[test]
    fn prediction_confirming_uptrend() {
        let text = market_prediction(
            "bitcoin",
            "Bitcoin",
            &PredictionInputs {
                current_price: 71_000.0,
                week_average: 70_000.0,
                change_24h: 2.5,
            },
        );
        assert!(text.contains("bullish trend"));
        assert!(text.contains("likely to rise"));
        assert!(text.contains("2.50%"));
        assert!(text.contains("coins/bitcoin"));
    }

    #[test]
    fn prediction_confirming_downtrend() {
        let text = market_prediction(
            "bitcoin",
            "Bitcoin",
            &PredictionInputs {
                current_price: 69_000.0,
                week_average: 70_000.0,
                change_24h: -1.2,
            },
        );
        assert!(text.contains("bearish trend"));
        assert!(text.contains("continue to fall"));
    }

    #[test]
    fn prediction_mixed_signals_are_neutral() {
        let text = market_prediction(
            "bitcoin",
            "Bitcoin",
            &PredictionInputs {
                current_price: 71_000.0,
                week_average: 70_000.0,
                change_24h: -0.8,
            },
        );
        assert!(text.contains("hard to predict"));
    }

    #[test]
    fn levels_for_known_and_unknown_symbols() {
        let btc = levels_message("btc");
        assert!(btc.contains("BTC"));
        assert!(btc.contains("$73,000"));
        assert!(btc.contains("$76,000"));

        let unknown = levels_message("xyz");
        assert!(unknown.contains("XYZ"));
        assert!(unknown.contains("Support: $N/A | Resistance: $N/A"));
    }

    #[test]
    fn analysis_wording_follows_the_sign() {
        assert!(market_analysis_message(1.23, "now").contains("rose by 1.23%"));
        assert!(market_analysis_message(-4.0, "now").contains("fell by 4.00%"));
    }

    #[test]
    fn surge_message_formats_direction_and_percent() {
        let alert = SurgeAlert {
            direction: Direction::Rose,
            percent: 6.004,
            current_price: 2716.25,
        };
        assert_eq!(
            surge_message(&alert, "ETH"),
            "⚠️ ETH surged 6.00% in the last 30 min! Now at $2,716.25."
        );
    }

    #[test]
    fn sentiment_idea_appends_tip_address() {
        assert_eq!(
            sentiment_idea("BTC", None),
            "BTC: 60% bullish sentiment - consider buying!"
        );
        assert!(sentiment_idea("BTC", Some("0xabc")).ends_with("Tips: 0xabc"));
    }

    #[test]
    fn top_markets_message_numbers_entries() {
        let coins = vec![
            MarketEntry {
                symbol: "btc".to_string(),
                current_price: Some(70_000.0),
                market_cap: Some(1_380_000_000_000.0),
            },
            MarketEntry {
                symbol: "eth".to_string(),
                current_price: None,
                market_cap: None,
            },
        ];
        let text = top_markets_message("📊 Top 20 Cryptocurrencies", &coins, "now");
        assert!(text.contains("1. BTC: $70,000 (Market Cap: $1,380,000,000,000)"));
        assert!(text.contains("2. ETH: $N/A (Market Cap: $N/A)"));
    }
}
