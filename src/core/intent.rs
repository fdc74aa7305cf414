//! Keyword intent classification for free-form queries.
//!
//! Rules are an ordered table evaluated first-match-wins; a rule fires when
//! every one of its keywords appears as a case-insensitive substring of the
//! message. The ordering is part of the contract: a message matching several
//! rules is handled by the earliest one only.

/// The inferred purpose of a free-form query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Spot-price lookup.
    Price,
    /// Top markets by capitalization.
    TopList,
    /// Current conditions for a city.
    Weather { city: String },
    /// Market prediction for the tracked asset.
    Forecast,
    /// No specialized handler; goes to the language-model fallback.
    Generic,
}

struct IntentRule {
    keywords: &'static [&'static str],
    build: fn(&str, &str) -> Intent,
}

const RULES: &[IntentRule] = &[
    IntentRule {
        keywords: &["price", "bitcoin"],
        build: |_, _| Intent::Price,
    },
    IntentRule {
        keywords: &["top", "crypto"],
        build: |_, _| Intent::TopList,
    },
    IntentRule {
        keywords: &["weather"],
        build: |lower, default_city| Intent::Weather {
            city: extract_city(lower, default_city),
        },
    },
    IntentRule {
        keywords: &["forecast"],
        build: |_, _| Intent::Forecast,
    },
    IntentRule {
        keywords: &["bitcoin"],
        build: |_, _| Intent::Forecast,
    },
];

/// Classify one message.
///
/// `default_city` is used when the weather rule fires but the message ends
/// with the keyword itself.
pub fn classify(text: &str, default_city: &str) -> Intent {
    let lower = text.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().all(|k| lower.contains(k)))
        .map(|rule| (rule.build)(&lower, default_city))
        .unwrap_or(Intent::Generic)
}

/// The city is the last whitespace-delimited token of the message; when that
/// token is the keyword itself ("what's the weather"), fall back to the
/// configured city.
fn extract_city(lower: &str, default_city: &str) -> String {
    match lower.split_whitespace().last() {
        Some(token) if token != "weather" => token.to_string(),
        _ => default_city.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_ref(text: &str) -> Intent {
        classify(text, "Sofia")
    }

    #[test]
    fn price_query_needs_both_keywords() {
        assert_eq!(
            classify_ref("what is the price of bitcoin today"),
            Intent::Price
        );
        // "price" alone is not enough.
        assert_eq!(classify_ref("what is the price of gold"), Intent::Generic);
    }

    #[test]
    fn top_crypto_resolves_to_top_list() {
        assert_eq!(classify_ref("show me the top crypto coins"), Intent::TopList);
    }

    #[test]
    fn weather_takes_the_last_token_as_city() {
        assert_eq!(
            classify_ref("how is the weather in Varna"),
            Intent::Weather {
                city: "varna".to_string()
            }
        );
    }

    #[test]
    fn weather_without_a_city_uses_the_default() {
        assert_eq!(
            classify_ref("what's the weather"),
            Intent::Weather {
                city: "Sofia".to_string()
            }
        );
    }

    #[test]
    fn forecast_or_asset_name_alone_predicts() {
        assert_eq!(classify_ref("any forecast for next week?"), Intent::Forecast);
        assert_eq!(classify_ref("tell me about bitcoin"), Intent::Forecast);
    }

    #[test]
    fn earlier_rules_win_over_later_ones() {
        // Matches both the price rule and the bare-asset rule; the price
        // rule is earlier in the table.
        assert_eq!(classify_ref("bitcoin price?"), Intent::Price);
        // Matches both weather and forecast; weather is earlier.
        assert_eq!(
            classify_ref("forecast the weather"),
            Intent::Weather {
                city: "Sofia".to_string()
            }
        );
    }

    #[test]
    fn unmatched_text_falls_back() {
        assert_eq!(classify_ref("tell me a joke"), Intent::Generic);
    }
}
