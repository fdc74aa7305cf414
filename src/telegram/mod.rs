//! Telegram bot integration.

pub mod client;
pub mod outbound;

pub use client::run_telegram_daemon;
pub use outbound::{Target, TelegramTransport, Transport};
