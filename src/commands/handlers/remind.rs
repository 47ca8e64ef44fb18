//! Reminder command handlers
//!
//! Handles: remind, reminders, edit_reminder
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: edit_reminder for time/channel/message edits
//! - 1.0.0: Initial implementation with create/list/delete/clear

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::channel::ChannelType;
use serenity::model::id::UserId;
use serenity::prelude::Context;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::commands::slash::{get_channel_option, get_integer_option, get_string_option};
use crate::features::reminders::{
    display_seconds, Created, Reminder, ReminderError, MAX_REMINDERS, MESSAGE_CHARACTER_LIMIT,
};

const INVALID_DURATION_TEXT: &str = "❌ Invalid duration. Use descending units like `30m`, `2h`, \
                                     `1h30m`, or `5w3d12h30m30s`, staying under 10 weeks.";
const NOT_FOUND_TEXT: &str = "❌ I could not find a reminder with that id.";
const BAD_CHANNEL_TEXT: &str = "❌ I cannot send a reminder to that channel.";

/// Handler for reminder-related commands
pub struct RemindHandler;

#[async_trait]
impl SlashCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remind", "reminders", "edit_reminder"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        // Reminders are scoped per guild member, so there is nothing to
        // attach them to in a DM.
        let Some(guild_id) = command.guild_id else {
            return respond(serenity_ctx, command, "❌ Reminders only work in servers.").await;
        };

        match command.data.name.as_str() {
            "remind" => {
                self.handle_remind(&ctx, serenity_ctx, command, guild_id.0)
                    .await
            }
            "reminders" => {
                self.handle_reminders(&ctx, serenity_ctx, command, guild_id.0)
                    .await
            }
            "edit_reminder" => {
                self.handle_edit(&ctx, serenity_ctx, command, guild_id.0)
                    .await
            }
            _ => Ok(()),
        }
    }
}

impl RemindHandler {
    /// Handle /remind - create a new reminder
    async fn handle_remind(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: u64,
    ) -> Result<()> {
        let user_id = command.user.id.0;

        let Some(time_str) = get_string_option(&command.data.options, "time") else {
            return respond(serenity_ctx, command, "❌ Missing `time` parameter.").await;
        };
        let message =
            get_string_option(&command.data.options, "message").unwrap_or_default();

        // An explicit destination has to pass the permission check; the
        // default destination is where the command was used.
        let destination = match get_channel_option(&command.data.options, "channel") {
            Some(target) => {
                if !can_deliver_to(serenity_ctx, target, command.user.id) {
                    return respond(serenity_ctx, command, BAD_CHANNEL_TEXT).await;
                }
                target
            }
            None => command.channel_id.0,
        };

        let now = Utc::now();
        match ctx
            .reminders
            .create(guild_id, user_id, destination, &message, &time_str, now)
            .await
        {
            Ok(Created::Scheduled(reminder)) => {
                let countdown = display_seconds(reminder.remaining_seconds(now));
                respond(
                    serenity_ctx,
                    command,
                    &format!(
                        "⏰ Okay! I will remind you at <#{destination}> in **{countdown}**. \
                         *(reminder #{})*",
                        reminder.id
                    ),
                )
                .await
            }
            Ok(Created::Immediate) => {
                debug!("zero-length reminder for user {user_id} sent immediately");
                respond(serenity_ctx, command, "⏰ That one was due right away, sent!").await
            }
            Err(ReminderError::InvalidFormat) => {
                respond(serenity_ctx, command, INVALID_DURATION_TEXT).await
            }
            Err(ReminderError::CapacityExceeded) => {
                respond(
                    serenity_ctx,
                    command,
                    &format!(
                        "❌ Reminder not set. You can only have {MAX_REMINDERS} reminders at a time."
                    ),
                )
                .await
            }
            Err(ReminderError::MessageTooLong) => {
                respond(
                    serenity_ctx,
                    command,
                    &format!(
                        "❌ Reminder messages are limited to {MESSAGE_CHARACTER_LIMIT} characters."
                    ),
                )
                .await
            }
            Err(e) => respond(serenity_ctx, command, &format!("❌ {e}")).await,
        }
    }

    /// Handle /reminders - list, delete, or clear
    async fn handle_reminders(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: u64,
    ) -> Result<()> {
        let user_id = command.user.id.0;
        let action = get_string_option(&command.data.options, "action")
            .unwrap_or_else(|| "list".to_string());

        match action.as_str() {
            "delete" => {
                let Some(id) = get_integer_option(&command.data.options, "id")
                    .and_then(|id| u64::try_from(id).ok())
                else {
                    return respond(
                        serenity_ctx,
                        command,
                        "❌ Provide a reminder id to delete. Use `/reminders` to see your ids.",
                    )
                    .await;
                };

                match ctx.reminders.delete(guild_id, user_id, id) {
                    Ok(_) => {
                        info!("deleted reminder {id} for user {user_id}");
                        respond(serenity_ctx, command, &format!("✅ Reminder #{id} deleted."))
                            .await
                    }
                    Err(_) => respond(serenity_ctx, command, NOT_FOUND_TEXT).await,
                }
            }
            "clear" => {
                let removed = ctx.reminders.clear(guild_id, user_id);
                if removed == 0 {
                    respond(serenity_ctx, command, "You have no reminders to delete.").await
                } else {
                    respond(
                        serenity_ctx,
                        command,
                        &format!(
                            "🧹 Deleted {removed} reminder{}.",
                            if removed == 1 { "" } else { "s" }
                        ),
                    )
                    .await
                }
            }
            _ => {
                let reminders = ctx.reminders.list(guild_id, user_id);
                if reminders.is_empty() {
                    respond(
                        serenity_ctx,
                        command,
                        "📋 You don't have any pending reminders.\n\nUse `/remind` to create one!",
                    )
                    .await
                } else {
                    respond(
                        serenity_ctx,
                        command,
                        &format_reminder_list(&reminders, Utc::now()),
                    )
                    .await
                }
            }
        }
    }

    /// Handle /edit_reminder - change time, channel, or message
    async fn handle_edit(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: u64,
    ) -> Result<()> {
        let user_id = command.user.id.0;

        let Some(field) = get_string_option(&command.data.options, "field") else {
            return respond(serenity_ctx, command, "❌ Missing `field` parameter.").await;
        };
        let Some(id) = get_integer_option(&command.data.options, "id")
            .and_then(|id| u64::try_from(id).ok())
        else {
            return respond(serenity_ctx, command, "❌ Missing `id` parameter.").await;
        };

        match field.as_str() {
            "time" => {
                let Some(time_str) = get_string_option(&command.data.options, "time") else {
                    return respond(
                        serenity_ctx,
                        command,
                        "❌ Provide a `time` value for a time edit.",
                    )
                    .await;
                };

                let now = Utc::now();
                match ctx.reminders.edit_time(guild_id, user_id, id, &time_str, now) {
                    Ok(reminder) => {
                        let countdown = display_seconds(reminder.remaining_seconds(now));
                        respond(
                            serenity_ctx,
                            command,
                            &format!("⏰ Okay, I will now remind you in **{countdown}**."),
                        )
                        .await
                    }
                    Err(ReminderError::InvalidFormat) => {
                        respond(serenity_ctx, command, INVALID_DURATION_TEXT).await
                    }
                    Err(_) => respond(serenity_ctx, command, NOT_FOUND_TEXT).await,
                }
            }
            "channel" => {
                let Some(target) = get_channel_option(&command.data.options, "channel") else {
                    return respond(
                        serenity_ctx,
                        command,
                        "❌ Provide a `channel` value for a channel edit.",
                    )
                    .await;
                };
                if !can_deliver_to(serenity_ctx, target, command.user.id) {
                    return respond(serenity_ctx, command, BAD_CHANNEL_TEXT).await;
                }

                match ctx.reminders.edit_destination(guild_id, user_id, id, target) {
                    Ok(reminder) => {
                        respond(
                            serenity_ctx,
                            command,
                            &format!(
                                "📨 Okay, I will now remind you at <#{}>.",
                                reminder.channel_id
                            ),
                        )
                        .await
                    }
                    Err(_) => respond(serenity_ctx, command, NOT_FOUND_TEXT).await,
                }
            }
            "message" => {
                let Some(message) = get_string_option(&command.data.options, "message") else {
                    return respond(
                        serenity_ctx,
                        command,
                        "❌ Provide a `message` value for a message edit.",
                    )
                    .await;
                };

                match ctx.reminders.edit_message(guild_id, user_id, id, &message) {
                    Ok(_) => {
                        respond(
                            serenity_ctx,
                            command,
                            "✏️ Okay, I changed your reminder's message.",
                        )
                        .await
                    }
                    Err(ReminderError::MessageTooLong) => {
                        respond(
                            serenity_ctx,
                            command,
                            &format!(
                                "❌ Reminder messages are limited to {MESSAGE_CHARACTER_LIMIT} characters."
                            ),
                        )
                        .await
                    }
                    Err(_) => respond(serenity_ctx, command, NOT_FOUND_TEXT).await,
                }
            }
            _ => {
                respond(
                    serenity_ctx,
                    command,
                    "❌ Unknown field. Use `time`, `channel`, or `message`.",
                )
                .await
            }
        }
    }
}

/// The bot must be able to send to the channel and the requesting user
/// must be able to see it.
fn can_deliver_to(ctx: &Context, channel_id: u64, user_id: UserId) -> bool {
    let Some(channel) = ctx.cache.guild_channel(channel_id) else {
        return false;
    };
    if channel.kind != ChannelType::Text {
        return false;
    }

    let bot_can_send = channel
        .permissions_for_user(&ctx.cache, ctx.cache.current_user_id())
        .map(|p| p.send_messages())
        .unwrap_or(false);
    let user_can_view = channel
        .permissions_for_user(&ctx.cache, user_id)
        .map(|p| p.view_channel())
        .unwrap_or(false);

    bot_can_send && user_can_view
}

/// Render a user's reminders, oldest first, with a live countdown.
fn format_reminder_list(reminders: &[Reminder], now: DateTime<Utc>) -> String {
    let mut display = String::from("📋 **Your pending reminders:**\n");
    for reminder in reminders {
        let remaining = reminder.remaining_seconds(now);
        let countdown = if remaining == 0 {
            "any moment now".to_string()
        } else {
            format!("in {}", display_seconds(remaining))
        };
        display.push_str(&format!(
            "\n**#{}** - <#{}> - {}\n> {}\n",
            reminder.id, reminder.channel_id, countdown, reminder.message
        ));
    }
    display.push_str("\n*Use `/reminders action:delete id:<id>` to cancel one.*");
    display
}
