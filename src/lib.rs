//! chainpulse library root.

pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod providers;
pub mod scheduler;
pub mod surge;
pub mod telegram;
pub mod web;

pub use cache::PriceCache;
pub use cli::Commands;
pub use config::{load_settings, Settings};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use scheduler::{default_jobs, run_scheduler, JobKind, JobRegistry};
pub use surge::{SurgeAlert, SurgeMonitor};
pub use telegram::{run_telegram_daemon, Target, TelegramTransport, Transport};
pub use web::run_web_server;
