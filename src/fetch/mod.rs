//! Fetch layer: one client per external data provider.
//!
//! Each client exposes a narrow typed contract; failures surface as
//! [`crate::error::Error`] and are recovered by the calling content path.

pub mod charts;
pub mod market;
pub mod news;
pub mod weather;

pub use market::{MarketClient, MarketEntry, MarketsQuery};
pub use news::NewsClient;
pub use weather::WeatherClient;
