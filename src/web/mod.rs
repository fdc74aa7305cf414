//! HTTP API mirroring the price and forecast feeds.

pub mod router;
pub mod server;

pub use server::run_web_server;
