//! chainpulse - Telegram-first crypto market broadcast bot.
//!
//! This is the main entry point.

use clap::Parser;
use std::process::ExitCode;

mod cache;
mod cli;
mod config;
mod content;
mod core;
mod dispatch;
mod error;
mod fetch;
mod logging;
mod providers;
mod scheduler;
mod surge;
mod telegram;
mod web;

use cli::Commands;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; the guard keeps the file appender alive.
    let _guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Parse command line arguments
    let args = Commands::parse();

    // Run the command
    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
