//! Outbound payload delivery.
//!
//! The dispatch engine talks to chat through this trait only, so tests can
//! record payloads instead of hitting the network.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, InputPollOption, Recipient};

use crate::error::{Error, Result};

/// Where a payload goes: the configured broadcast chat or the conversation
/// the trigger came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Broadcast,
    Chat(i64),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, target: &Target, text: &str) -> Result<()>;

    async fn send_photo(&self, target: &Target, url: &str, caption: &str) -> Result<()>;

    async fn send_poll(&self, target: &Target, question: &str, options: &[String]) -> Result<()>;
}

/// Teloxide-backed transport.
pub struct TelegramTransport {
    bot: Bot,
    broadcast: Option<Recipient>,
}

impl TelegramTransport {
    /// `broadcast_chat` is either an `@channel` handle or a numeric chat id.
    pub fn new(bot: Bot, broadcast_chat: Option<&str>) -> Self {
        let broadcast = broadcast_chat.map(|chat| {
            if chat.starts_with('@') {
                Recipient::ChannelUsername(chat.to_string())
            } else {
                Recipient::Id(ChatId(chat.parse().unwrap_or(0)))
            }
        });
        Self { bot, broadcast }
    }

    fn recipient(&self, target: &Target) -> Result<Recipient> {
        match target {
            Target::Chat(id) => Ok(Recipient::Id(ChatId(*id))),
            Target::Broadcast => self
                .broadcast
                .clone()
                .ok_or_else(|| Error::Delivery("no broadcast chat configured".to_string())),
        }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, target: &Target, text: &str) -> Result<()> {
        let recipient = self.recipient(target)?;
        self.bot
            .send_message(recipient, text.to_string())
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(&self, target: &Target, url: &str, caption: &str) -> Result<()> {
        let recipient = self.recipient(target)?;
        let url = reqwest::Url::parse(url).map_err(|e| Error::Delivery(format!("photo url: {}", e)))?;

        let mut request = self.bot.send_photo(recipient, InputFile::url(url));
        if !caption.is_empty() {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn send_poll(&self, target: &Target, question: &str, options: &[String]) -> Result<()> {
        let recipient = self.recipient(target)?;
        let options: Vec<InputPollOption> = options
            .iter()
            .map(|option| InputPollOption::new(option.clone()))
            .collect();

        self.bot
            .send_poll(recipient, question.to_string(), options)
            .is_anonymous(false)
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(())
    }
}
