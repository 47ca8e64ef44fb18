//! # Feature: Reminders
//!
//! Delayed, cancellable reminder delivery with a per-user cap on pending
//! reminders. The registry is in-memory only: reminders do not survive a
//! restart, and delivery is at-most-once, best-effort.
//!
//! - **Version**: 2.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 2.1.0: Edit operations (time, channel, message) with timer re-arming
//! - 2.0.0: Per-scope capacity enforcement, bulk clear
//! - 1.0.0: Initial release with create/list/delete and compound durations

pub mod delivery;
pub mod duration;
pub mod scheduler;
pub mod service;
pub mod store;

pub use delivery::DiscordDelivery;
pub use duration::{display_seconds, ReminderDuration};
pub use scheduler::{ReminderDelivery, ReminderScheduler, MAX_SLEEP_SECONDS};
pub use service::{Created, ReminderService, MESSAGE_CHARACTER_LIMIT};
pub use store::{Reminder, ReminderStore, ScopeKey, MAX_REMINDERS};

use std::fmt;

/// Recoverable failures surfaced by the reminder engine.
///
/// Every variant is a value returned to the caller; none of them abort
/// anything. The command layer owns turning these into user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderError {
    /// The duration text does not match the grammar
    InvalidFormat,
    /// The owner already has the maximum number of pending reminders
    CapacityExceeded,
    /// No reminder with that id exists for the owner (never created,
    /// already deleted, or already fired)
    NotFound,
    /// The reminder message exceeds the character limit
    MessageTooLong,
}

impl fmt::Display for ReminderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderError::InvalidFormat => write!(f, "invalid duration format"),
            ReminderError::CapacityExceeded => write!(f, "reminder capacity reached"),
            ReminderError::NotFound => write!(f, "reminder not found"),
            ReminderError::MessageTooLong => write!(f, "reminder message too long"),
        }
    }
}

impl std::error::Error for ReminderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ReminderError::InvalidFormat.to_string(), "invalid duration format");
        assert_eq!(ReminderError::NotFound.to_string(), "reminder not found");
    }
}
