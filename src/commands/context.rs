//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use std::sync::Arc;

use crate::features::reminders::ReminderService;

/// Services every command handler can reach.
pub struct CommandContext {
    /// The reminder engine
    pub reminders: Arc<ReminderService>,

    /// Process start, for uptime reporting
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(reminders: Arc<ReminderService>) -> Self {
        CommandContext {
            reminders,
            start_time: std::time::Instant::now(),
        }
    }
}
