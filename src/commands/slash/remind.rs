//! # Reminder Commands
//!
//! Definitions for /remind, /reminders, and /edit_reminder.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Add /edit_reminder
//! - 1.0.0: Initial /remind and /reminders

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_remind_command(),
        create_reminders_command(),
        create_edit_reminder_command(),
    ]
}

fn create_remind_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("remind")
        .description("Create a reminder, e.g. time 1h30m")
        .create_option(|option| {
            option
                .name("time")
                .description("Delay in descending units: weeks, days, hours, minutes, seconds (e.g. 5w3d12h30m30s)")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(20)
        })
        .create_option(|option| {
            option
                .name("message")
                .description("What to remind you about")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(100)
        })
        .create_option(|option| {
            option
                .name("channel")
                .description("Channel to deliver to (defaults to this channel)")
                .kind(CommandOptionType::Channel)
                .required(false)
        });
    command
}

fn create_reminders_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("reminders")
        .description("List, delete, or clear your pending reminders")
        .create_option(|option| {
            option
                .name("action")
                .description("What to do (defaults to list)")
                .kind(CommandOptionType::String)
                .required(false)
                .add_string_choice("list - Show your pending reminders", "list")
                .add_string_choice("delete - Delete one reminder by id", "delete")
                .add_string_choice("clear - Delete all your reminders", "clear")
        })
        .create_option(|option| {
            option
                .name("id")
                .description("Reminder id (required for delete)")
                .kind(CommandOptionType::Integer)
                .required(false)
        });
    command
}

fn create_edit_reminder_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("edit_reminder")
        .description("Edit a pending reminder's time, channel, or message")
        .create_option(|option| {
            option
                .name("field")
                .description("Which part of the reminder to change")
                .kind(CommandOptionType::String)
                .required(true)
                .add_string_choice("time - Reschedule from now", "time")
                .add_string_choice("channel - Change the delivery channel", "channel")
                .add_string_choice("message - Change the message text", "message")
        })
        .create_option(|option| {
            option
                .name("id")
                .description("Reminder id (see /reminders)")
                .kind(CommandOptionType::Integer)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("time")
                .description("New delay, e.g. 5m (for time edits)")
                .kind(CommandOptionType::String)
                .required(false)
                .max_length(20)
        })
        .create_option(|option| {
            option
                .name("channel")
                .description("New delivery channel (for channel edits)")
                .kind(CommandOptionType::Channel)
                .required(false)
        })
        .create_option(|option| {
            option
                .name("message")
                .description("New message text (for message edits)")
                .kind(CommandOptionType::String)
                .required(false)
                .max_length(100)
        });
    command
}
