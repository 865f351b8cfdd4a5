//! Outbound alert channels.

use async_trait::async_trait;
use coinflow_core::traits::Notifier;
use tracing::{debug, info};

/// Sends alerts to a Telegram chat.
///
/// Strictly fire-and-forget: any transport or API failure is logged at
/// debug level and swallowed, a dropped alert never affects the trading
/// loop.
pub struct TelegramNotifier {
    client: reqwest::Client,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Build from optional config values; `None` when either is missing.
    pub fn from_config(token: Option<&str>, chat_id: Option<&str>) -> Option<Self> {
        match (token, chat_id) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                Some(Self::new(token, chat_id))
            }
            _ => None,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": message,
        });

        if let Err(err) = self.client.post(&url).json(&payload).send().await {
            debug!(error = %err, "telegram alert dropped");
        }
    }
}

/// Writes alerts to the log. Used when Telegram is not configured and in
/// paper sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) {
        info!(alert = message, "notification");
    }
}
