//! CLI commands for chainpulse using clap.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use teloxide::Bot;

use crate::config::{load_settings_or_default, Settings};
use crate::dispatch::Dispatcher;
use crate::scheduler::{default_jobs, run_scheduler, JobRegistry};
use crate::telegram::{run_telegram_daemon, TelegramTransport};
use crate::web::run_web_server;

/// chainpulse - Telegram-first crypto market broadcast bot.
#[derive(Parser)]
#[command(name = "chainpulse")]
#[command(version = "0.1.0")]
#[command(about = "Scheduled crypto market broadcasts and on-demand answers", long_about = None)]
pub struct Commands {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the bot: Telegram polling, scheduler and web API
    Start,

    /// Run one scheduled job immediately (posts to the broadcast chat)
    Post {
        /// Job id, as shown by `chainpulse jobs`
        job: String,
    },

    /// Answer a free-form query from the shell
    Ask {
        /// Query text
        text: String,
    },

    /// List the scheduled jobs and their next occurrence
    Jobs,
}

impl Commands {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Start => cmd_start().await,
            Command::Post { job } => cmd_post(&job).await,
            Command::Ask { text } => cmd_ask(&text).await,
            Command::Jobs => cmd_jobs(),
        }
    }
}

fn build_dispatcher(settings: &Settings) -> Result<(Arc<Dispatcher>, Bot)> {
    let token = settings
        .telegram_token()
        .context("No bot token configured. Set channels.telegram.bot_token or TELEGRAM_TOKEN.")?;

    let bot = Bot::new(token);
    let transport = Arc::new(TelegramTransport::new(
        bot.clone(),
        settings.channels.telegram.broadcast_chat.as_deref(),
    ));
    let dispatcher = Arc::new(Dispatcher::new(settings.clone(), transport));
    Ok((dispatcher, bot))
}

async fn cmd_start() -> Result<()> {
    let settings = load_settings_or_default();
    let (dispatcher, bot) = build_dispatcher(&settings)?;

    let registry = JobRegistry::new(default_jobs())?;

    tracing::info!("chainpulse starting");

    tokio::select! {
        _ = run_telegram_daemon(bot, dispatcher.clone()) => {
            tracing::warn!("Telegram daemon exited");
        }
        _ = run_scheduler(dispatcher.clone(), registry) => {
            tracing::warn!("Scheduler exited");
        }
        result = run_web_server(dispatcher.clone(), settings.web.port) => {
            if let Err(e) = result {
                bail!("Web server failed: {}", e);
            }
        }
    }

    Ok(())
}

async fn cmd_post(job_id: &str) -> Result<()> {
    let settings = load_settings_or_default();
    let (dispatcher, _bot) = build_dispatcher(&settings)?;

    let job = default_jobs()
        .into_iter()
        .find(|j| j.id == job_id)
        .with_context(|| {
            format!(
                "Unknown job '{}'. Run `chainpulse jobs` for the list.",
                job_id
            )
        })?;

    dispatcher.run_job(job.job).await?;
    println!("Job '{}' posted.", job.id);
    Ok(())
}

async fn cmd_ask(text: &str) -> Result<()> {
    let settings = load_settings_or_default();
    let (dispatcher, _bot) = build_dispatcher(&settings)?;

    let reply = dispatcher.answer(text).await;
    println!("{}", reply);
    Ok(())
}

fn cmd_jobs() -> Result<()> {
    let registry = JobRegistry::new(default_jobs())?;

    println!("Scheduled jobs:");
    for (job, next) in registry.upcoming() {
        let next = next
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!("  {:<10} {:<18} next: {}", job.id, job.cron, next);
    }
    Ok(())
}
