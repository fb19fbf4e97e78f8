//! Telegram bot sink
//!
//! Posts the summary to the Bot API with a blocking client. The request
//! timeout keeps a slow Telegram from stalling the polling loop.

use crate::config::TelegramConfig;
use crate::error::{Result, WatchError};
use crate::notify::NotifySink;
use std::time::Duration;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TelegramSink {
    client: reqwest::blocking::Client,
    api_url: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| WatchError::Configuration(format!("failed to build telegram client: {}", e)))?;
        Ok(Self {
            client,
            api_url: format!("https://api.telegram.org/bot{}/sendMessage", config.bot_token),
            chat_id: config.chat_id.clone(),
        })
    }

    fn delivery_error(&self, err: impl std::fmt::Display) -> WatchError {
        WatchError::Delivery { sink: self.name().to_string(), reason: err.to_string() }
    }
}

impl NotifySink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    fn deliver(&self, message: &str) -> Result<()> {
        let text = format!("You have new grades!\n{}", message);
        self.client
            .post(&self.api_url)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text.as_str())])
            .send()
            .map_err(|e| self.delivery_error(e))?
            .error_for_status()
            .map_err(|e| self.delivery_error(e))?;
        Ok(())
    }
}
