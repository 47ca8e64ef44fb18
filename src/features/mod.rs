//! # Features Layer
//!
//! Feature modules for the bot. Each feature owns its domain types and
//! exposes a small public surface re-exported here.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod reminders;

// Re-export feature items for convenience
pub use reminders::{
    Created, DiscordDelivery, Reminder, ReminderDelivery, ReminderDuration, ReminderError,
    ReminderScheduler, ReminderService, ReminderStore,
};
