//! QuickChart URL builder.
//!
//! The rendering service accepts a chart config as a query parameter and
//! returns an image, so producing the URL is the whole job; the transport
//! hands it to Telegram which fetches the image itself.

use crate::error::{Error, Result};

const QUICKCHART_BASE: &str = "https://quickchart.io/chart";

/// A pie chart spec.
#[derive(Debug, Clone)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    pub colors: Vec<String>,
}

/// Build a rendered-image URL for a pie chart.
pub fn pie_chart_url(chart: &PieChart) -> Result<reqwest::Url> {
    let config = serde_json::json!({
        "type": "pie",
        "data": {
            "labels": chart.labels,
            "datasets": [{
                "data": chart.values,
                "backgroundColor": chart.colors,
            }],
        },
        "options": {
            "title": { "display": true, "text": chart.title },
        },
    });

    reqwest::Url::parse_with_params(
        QUICKCHART_BASE,
        &[("c", config.to_string()), ("format", "png".to_string())],
    )
    .map_err(|e| Error::Format(format!("chart url: {}", e)))
}
