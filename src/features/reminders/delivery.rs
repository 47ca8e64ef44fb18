//! Discord-backed reminder delivery
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::ChannelId;
use tokio::sync::RwLock;

use super::scheduler::ReminderDelivery;

/// Sends reminders through the Discord HTTP API, mentioning the owner.
///
/// The HTTP client only exists once the gateway connection is up, so the
/// handle is bound from the `ready` event rather than at construction.
/// Deliveries before then fail, which the scheduler logs and swallows.
pub struct DiscordDelivery {
    http: RwLock<Option<Arc<Http>>>,
}

impl DiscordDelivery {
    pub fn new() -> Self {
        DiscordDelivery {
            http: RwLock::new(None),
        }
    }

    /// Bind the HTTP client once the gateway reports ready.
    pub async fn set_http(&self, http: Arc<Http>) {
        *self.http.write().await = Some(http);
    }
}

impl Default for DiscordDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderDelivery for DiscordDelivery {
    async fn deliver(&self, channel_id: u64, user_id: u64, message: &str) -> Result<()> {
        let http = self
            .http
            .read()
            .await
            .clone()
            .ok_or_else(|| anyhow::anyhow!("gateway connection not ready"))?;

        ChannelId(channel_id)
            .say(http.as_ref(), format!("<@{user_id}> {message}"))
            .await?;
        debug!("delivered reminder to channel {channel_id} for user {user_id}");
        Ok(())
    }
}
