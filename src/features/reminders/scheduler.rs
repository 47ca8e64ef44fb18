//! Delayed delivery lifecycle
//!
//! Every armed reminder gets one spawned task that sleeps out the delay
//! and then tries to take the reminder out of the store. Store removal is
//! the single arbitration point: firing, deletion, clearing, and editing
//! all race for the entry, whoever takes it first wins, and the losers
//! observe it already gone. Delivery only ever happens to the winner, so
//! it is at-most-once regardless of interleaving.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Re-arming for time edits
//! - 1.0.0: Initial release with arm/cancel and chained long waits

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::store::{Reminder, ReminderStore};

/// Longest single wait, in seconds (40 days). Sleeps much past this are
/// unreliable on some platforms, so longer delays run as a chain of
/// bounded waits.
pub const MAX_SLEEP_SECONDS: u64 = 60 * 60 * 24 * 40;

/// Outbound delivery contract.
///
/// The scheduler calls this for every reminder that fires (and the
/// service for immediate sends). Implementations report failures through
/// the `Result`; the engine logs and discards them, because a reminder is
/// fulfilled once it leaves the store whether or not the send landed.
#[async_trait]
pub trait ReminderDelivery: Send + Sync {
    async fn deliver(&self, channel_id: u64, user_id: u64, message: &str) -> Result<()>;
}

/// Owns the in-flight timer for every armed reminder.
///
/// Timer handles are correlated by reminder id; reminder state itself
/// stays in the store.
pub struct ReminderScheduler {
    store: Arc<ReminderStore>,
    delivery: Arc<dyn ReminderDelivery>,
    timers: Arc<DashMap<u64, JoinHandle<()>>>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<ReminderStore>, delivery: Arc<dyn ReminderDelivery>) -> Self {
        ReminderScheduler {
            store,
            delivery,
            timers: Arc::new(DashMap::new()),
        }
    }

    /// Schedule a reminder to fire no earlier than `delay_seconds` from
    /// now. The reminder must already be in the store.
    pub fn arm(&self, reminder: &Reminder, delay_seconds: u64) {
        let id = reminder.id;
        let scope = reminder.scope();
        let store = Arc::clone(&self.store);
        let delivery = Arc::clone(&self.delivery);
        let timers = Arc::clone(&self.timers);

        let handle = tokio::spawn(async move {
            wait(delay_seconds).await;
            timers.remove(&id);

            let Some(reminder) = store.remove(scope, id) else {
                // Deleted, cleared, or re-armed while we slept; the winner
                // of the removal race already resolved this reminder.
                debug!("reminder {id} gone at expiry, skipping delivery");
                return;
            };

            debug!(
                "reminder {id} fired for user {} in channel {}",
                reminder.user_id, reminder.channel_id
            );
            if let Err(e) = delivery
                .deliver(reminder.channel_id, reminder.user_id, &reminder.message)
                .await
            {
                warn!("reminder {id}: delivery failed: {e}");
            }
        });

        self.timers.insert(id, handle);
    }

    /// Stop a reminder's wait chain so it will not fire.
    ///
    /// Idempotent: cancelling an already-fired or already-cancelled
    /// reminder is a no-op. A firing that is past its store removal is
    /// not interrupted; cancellation only prevents future delivery.
    pub fn cancel(&self, id: u64) {
        if let Some((_, handle)) = self.timers.remove(&id) {
            handle.abort();
            debug!("reminder {id} timer cancelled");
        }
    }

    /// Replace a reminder's timer with a fresh delay (time edits).
    pub fn rearm(&self, reminder: &Reminder, delay_seconds: u64) {
        self.cancel(reminder.id);
        self.arm(reminder, delay_seconds);
    }

    /// Deliver without scheduling, for zero-length durations.
    pub async fn deliver_now(&self, channel_id: u64, user_id: u64, message: &str) {
        if let Err(e) = self.delivery.deliver(channel_id, user_id, message).await {
            warn!("immediate reminder delivery failed: {e}");
        }
    }

    /// Number of reminders with a live timer.
    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }
}

/// Sleep for `total_seconds`, chaining waits of at most
/// [`MAX_SLEEP_SECONDS`] until the remainder is exhausted.
async fn wait(total_seconds: u64) {
    let mut remaining = total_seconds;
    while remaining > MAX_SLEEP_SECONDS {
        sleep(Duration::from_secs(MAX_SLEEP_SECONDS)).await;
        remaining -= MAX_SLEEP_SECONDS;
    }
    sleep(Duration::from_secs(remaining)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDelivery {
        sent: Mutex<Vec<(u64, u64, String)>>,
    }

    impl RecordingDelivery {
        fn sent(&self) -> Vec<(u64, u64, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReminderDelivery for RecordingDelivery {
        async fn deliver(&self, channel_id: u64, user_id: u64, message: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((channel_id, user_id, message.to_string()));
            Ok(())
        }
    }

    fn setup() -> (ReminderScheduler, Arc<ReminderStore>, Arc<RecordingDelivery>) {
        let store = Arc::new(ReminderStore::new());
        let recorder = Arc::new(RecordingDelivery::default());
        let delivery: Arc<dyn ReminderDelivery> = recorder.clone();
        let scheduler = ReminderScheduler::new(Arc::clone(&store), delivery);
        (scheduler, store, recorder)
    }

    fn stored_reminder(store: &ReminderStore, delay_seconds: u64) -> Reminder {
        let now: DateTime<Utc> = Utc::now();
        let reminder = Reminder {
            id: store.next_id(),
            guild_id: 1,
            user_id: 2,
            channel_id: 3,
            message: "wake up".to_string(),
            created_at: now,
            expires_at: now + chrono::Duration::seconds(delay_seconds as i64),
        };
        store.insert(reminder.clone()).unwrap();
        reminder
    }

    #[tokio::test]
    async fn test_fire_removes_from_store_and_delivers() {
        let (scheduler, store, recorder) = setup();
        let reminder = stored_reminder(&store, 0);

        scheduler.arm(&reminder, 0);
        sleep(Duration::from_millis(300)).await;

        assert_eq!(recorder.sent(), vec![(3, 2, "wake up".to_string())]);
        assert_eq!(store.count(reminder.scope()), 0);
        assert_eq!(scheduler.armed_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_prevents_delivery() {
        let (scheduler, store, recorder) = setup();
        let reminder = stored_reminder(&store, 1);

        scheduler.arm(&reminder, 1);
        scheduler.cancel(reminder.id);
        sleep(Duration::from_millis(1500)).await;

        assert!(recorder.sent().is_empty());
        // Cancellation only stops the timer; detaching the record is the
        // caller's job.
        assert_eq!(store.count(reminder.scope()), 1);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let (scheduler, store, _recorder) = setup();
        let reminder = stored_reminder(&store, 1);

        scheduler.arm(&reminder, 1);
        scheduler.cancel(reminder.id);
        scheduler.cancel(reminder.id);
        scheduler.cancel(9999);
    }

    #[tokio::test]
    async fn test_fire_after_removal_skips_delivery() {
        let (scheduler, store, recorder) = setup();
        let reminder = stored_reminder(&store, 0);

        // Simulate a delete winning the race before the timer fires
        store.remove(reminder.scope(), reminder.id).unwrap();
        scheduler.arm(&reminder, 0);
        sleep(Duration::from_millis(300)).await;

        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn test_rearm_fires_once_on_new_delay() {
        let (scheduler, store, recorder) = setup();
        let reminder = stored_reminder(&store, 3600);

        scheduler.arm(&reminder, 3600);
        scheduler.rearm(&reminder, 0);
        sleep(Duration::from_millis(300)).await;

        assert_eq!(recorder.sent().len(), 1);
        assert_eq!(store.count(reminder.scope()), 0);
    }

    #[tokio::test]
    async fn test_deliver_now_bypasses_store() {
        let (scheduler, store, recorder) = setup();

        scheduler.deliver_now(7, 8, "right away").await;

        assert_eq!(recorder.sent(), vec![(7, 8, "right away".to_string())]);
        assert_eq!(store.count((1, 2)), 0);
    }
}
