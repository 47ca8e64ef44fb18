//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Add edit_reminder handling to RemindHandler
//! - 1.0.0: Initial extraction into per-handler modules

pub mod remind;
pub mod utility;

use std::sync::Arc;

use anyhow::Result;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(remind::RemindHandler),
        Arc::new(utility::UtilityHandler),
    ]
}

/// Answer an interaction with a plain text message.
pub(crate) async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content))
        })
        .await?;
    Ok(())
}
