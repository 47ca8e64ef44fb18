//! Utility command handlers
//!
//! Handles: ping, version, uptime

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::features::reminders::display_seconds;

pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "version", "uptime"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => respond(serenity_ctx, command, "🏓 Pong!").await,
            "version" => {
                respond(
                    serenity_ctx,
                    command,
                    &format!("chime v{}", env!("CARGO_PKG_VERSION")),
                )
                .await
            }
            "uptime" => {
                let uptime = display_seconds(ctx.start_time.elapsed().as_secs());
                let uptime = if uptime.is_empty() {
                    "less than a second".to_string()
                } else {
                    uptime
                };
                respond(serenity_ctx, command, &format!("⏱️ Up for **{uptime}**.")).await
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        assert_eq!(handler.command_names(), &["ping", "version", "uptime"]);
    }
}
