//! Top-level slash command dispatch
//!
//! Routes each interaction to the handler registered for its command
//! name, with a request id correlating the log lines of one interaction.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use uuid::Uuid;

use crate::commands::handlers::create_all_handlers;
use crate::commands::{CommandContext, CommandRegistry};
use crate::features::reminders::ReminderService;

pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(reminders: Arc<ReminderService>) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }

        CommandHandler {
            context: Arc::new(CommandContext::new(reminders)),
            registry,
        }
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] Slash command received | Command: {} | User: {} | Guild: {}",
            command.data.name,
            command.user.id,
            command
                .guild_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "DM".to_string())
        );

        let Some(handler) = self.registry.get(&command.data.name) else {
            warn!(
                "[{request_id}] No handler registered for command '{}'",
                command.data.name
            );
            return Ok(());
        };

        handler
            .handle(Arc::clone(&self.context), ctx, command)
            .await?;
        info!("[{request_id}] Command '{}' completed", command.data.name);
        Ok(())
    }
}
