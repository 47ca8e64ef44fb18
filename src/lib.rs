// Core layer - shared configuration
pub mod core;

// Features layer - the reminder engine
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items for convenience
pub use features::{
    // Reminders
    Created, DiscordDelivery, Reminder, ReminderDelivery, ReminderDuration, ReminderError,
    ReminderScheduler, ReminderService, ReminderStore,
};

// Re-export the top-level command dispatcher
pub use command_handler::CommandHandler;
