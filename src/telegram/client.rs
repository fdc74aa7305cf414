//! Telegram bot client - simple polling version.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::RequestError;

use crate::dispatch::Dispatcher;

/// Run the telegram bot daemon using simple polling.
pub async fn run_telegram_daemon(bot: Bot, dispatcher: Arc<Dispatcher>) {
    tracing::info!("Starting Telegram bot...");

    if let Err(e) = bot
        .set_my_commands(vec![
            teloxide::types::BotCommand::new("analyze", "Sentiment chart for a coin"),
            teloxide::types::BotCommand::new("levels", "Support/resistance for a coin"),
            teloxide::types::BotCommand::new("poll", "Start a quick poll"),
            teloxide::types::BotCommand::new("bloodmoon", "Blood Moon event info"),
        ])
        .await
    {
        tracing::warn!("Failed to set commands: {}", e);
    }

    tracing::info!("Telegram bot commands set");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let dispatcher = dispatcher.clone();
        async move { handle_update(bot, msg, dispatcher).await }
    })
    .await;
}

/// Handle one incoming update.
///
/// Dispatch failures stay on this side of the polling loop; an error
/// returned to teloxide would stall the whole repl.
async fn handle_update(
    _bot: Bot,
    msg: Message,
    dispatcher: Arc<Dispatcher>,
) -> Result<(), RequestError> {
    let chat_id = msg.chat.id.0;

    if let Some(members) = msg.new_chat_members() {
        let joined: Vec<(i64, String)> = members
            .iter()
            .map(|user| (user.id.0 as i64, user.first_name.clone()))
            .collect();
        dispatcher.handle_new_members(chat_id, &joined).await;
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }

    tracing::info!("Received message from chat {}", chat_id);

    if let Err(e) = dispatcher.handle_text(chat_id, text).await {
        tracing::error!("Failed to handle message in chat {}: {}", chat_id, e);
    }

    Ok(())
}
