//! Weather report formatting.

use crate::fetch::weather::Conditions;

pub fn weather_message(city: &str, conditions: &Conditions, stamp: &str) -> String {
    format!(
        "🌤️ Weather in {} today ({}):\nTemperature: {}°C\nFeels like: {}°C\nDescription: {}\nHumidity: {}%",
        city,
        stamp,
        conditions.temp,
        conditions.feels_like,
        conditions.description,
        conditions.humidity
    )
}
