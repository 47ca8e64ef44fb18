//! Reminder operations
//!
//! The service is the only entry point the command layer talks to. It
//! combines the store and the scheduler under the capacity and identity
//! rules: a reminder is always inserted before its timer is armed, so a
//! failure between the two leaves an inert but listed reminder rather
//! than a timer with no record behind it.
//!
//! - **Version**: 2.1.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use super::duration::ReminderDuration;
use super::scheduler::ReminderScheduler;
use super::store::{Reminder, ReminderStore, ScopeKey};
use super::ReminderError;

/// Maximum reminder message length, in characters.
pub const MESSAGE_CHARACTER_LIMIT: usize = 100;

/// Outcome of a create call.
#[derive(Debug, Clone)]
pub enum Created {
    /// Stored and armed; will fire at `expires_at`.
    Scheduled(Reminder),
    /// Zero-length duration: delivered on the spot, nothing stored.
    Immediate,
}

pub struct ReminderService {
    store: Arc<ReminderStore>,
    scheduler: ReminderScheduler,
}

impl ReminderService {
    pub fn new(store: Arc<ReminderStore>, scheduler: ReminderScheduler) -> Self {
        ReminderService { store, scheduler }
    }

    /// Create a reminder for `message` to be sent to `channel_id` after
    /// the delay written in `duration_text`.
    ///
    /// Parsing runs first so a malformed duration never touches state. A
    /// zero-second duration short-circuits into an immediate send and is
    /// never stored.
    pub async fn create(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
        message: &str,
        duration_text: &str,
        now: DateTime<Utc>,
    ) -> Result<Created, ReminderError> {
        let duration = ReminderDuration::parse(duration_text)?;
        if message.chars().count() > MESSAGE_CHARACTER_LIMIT {
            return Err(ReminderError::MessageTooLong);
        }

        let scope: ScopeKey = (guild_id, user_id);
        if self.store.is_at_capacity(scope) {
            return Err(ReminderError::CapacityExceeded);
        }

        if duration.is_immediate() {
            self.scheduler.deliver_now(channel_id, user_id, message).await;
            return Ok(Created::Immediate);
        }

        let reminder = Reminder {
            id: self.store.next_id(),
            guild_id,
            user_id,
            channel_id,
            message: message.to_string(),
            created_at: now,
            expires_at: now + chrono::Duration::seconds(duration.seconds() as i64),
        };

        // Insert is the commit point; it re-checks capacity under the
        // scope lock. Stored before armed.
        self.store.insert(reminder.clone())?;
        self.scheduler.arm(&reminder, duration.seconds());

        info!(
            "created reminder {} for user {user_id} in guild {guild_id}, due in {}",
            reminder.id,
            duration.display()
        );
        Ok(Created::Scheduled(reminder))
    }

    /// A user's pending reminders, oldest first.
    pub fn list(&self, guild_id: u64, user_id: u64) -> Vec<Reminder> {
        self.store.list((guild_id, user_id))
    }

    /// Delete one reminder and stop its timer.
    pub fn delete(&self, guild_id: u64, user_id: u64, id: u64) -> Result<Reminder, ReminderError> {
        let reminder = self
            .store
            .remove((guild_id, user_id), id)
            .ok_or(ReminderError::NotFound)?;
        self.scheduler.cancel(id);
        info!("deleted reminder {id} for user {user_id} in guild {guild_id}");
        Ok(reminder)
    }

    /// Delete every reminder for a user, returning how many there were.
    pub fn clear(&self, guild_id: u64, user_id: u64) -> usize {
        let removed = self.store.clear((guild_id, user_id));
        for reminder in &removed {
            self.scheduler.cancel(reminder.id);
        }
        if !removed.is_empty() {
            info!(
                "cleared {} reminders for user {user_id} in guild {guild_id}",
                removed.len()
            );
        }
        removed.len()
    }

    /// Push a reminder's expiry out (or in) to `now` plus the new
    /// duration, replacing its timer.
    pub fn edit_time(
        &self,
        guild_id: u64,
        user_id: u64,
        id: u64,
        duration_text: &str,
        now: DateTime<Utc>,
    ) -> Result<Reminder, ReminderError> {
        let duration = ReminderDuration::parse(duration_text)?;
        let updated = self
            .store
            .update((guild_id, user_id), id, |r| {
                r.expires_at = now + chrono::Duration::seconds(duration.seconds() as i64);
            })
            .ok_or(ReminderError::NotFound)?;
        self.scheduler.rearm(&updated, duration.seconds());
        Ok(updated)
    }

    /// Point a reminder at a different channel. The timer is untouched.
    pub fn edit_destination(
        &self,
        guild_id: u64,
        user_id: u64,
        id: u64,
        channel_id: u64,
    ) -> Result<Reminder, ReminderError> {
        self.store
            .update((guild_id, user_id), id, |r| r.channel_id = channel_id)
            .ok_or(ReminderError::NotFound)
    }

    /// Replace a reminder's message text. The timer is untouched.
    pub fn edit_message(
        &self,
        guild_id: u64,
        user_id: u64,
        id: u64,
        message: &str,
    ) -> Result<Reminder, ReminderError> {
        if message.chars().count() > MESSAGE_CHARACTER_LIMIT {
            return Err(ReminderError::MessageTooLong);
        }
        self.store
            .update((guild_id, user_id), id, |r| r.message = message.to_string())
            .ok_or(ReminderError::NotFound)
    }
}
