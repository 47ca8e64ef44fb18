//! In-memory reminder registry
//!
//! One process-wide store instance owns every pending reminder, keyed by
//! the `(guild, user)` scope that capacity and listing apply to. DashMap
//! gives per-scope entry locks, so operations on the same scope are
//! serialized while different scopes proceed independently.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::ReminderError;

/// Maximum pending reminders per scope.
pub const MAX_REMINDERS: usize = 4;

/// Composite key for reminder ownership: (guild_id, user_id).
/// Capacity and listing are scoped per user per guild.
pub type ScopeKey = (u64, u64);

/// One pending reminder.
///
/// The store holds the canonical record; the scheduler correlates its
/// timer by `id` and never keeps a copy of this state.
#[derive(Debug, Clone)]
pub struct Reminder {
    /// Store-assigned id, unique for the process lifetime, never reused
    pub id: u64,
    pub guild_id: u64,
    pub user_id: u64,
    /// Channel the reminder will be delivered to
    pub channel_id: u64,
    pub message: String,
    /// Creation time; only used for stable listing order
    pub created_at: DateTime<Utc>,
    /// Absolute time delivery is due
    pub expires_at: DateTime<Utc>,
}

impl Reminder {
    /// The ownership scope this reminder counts against.
    pub fn scope(&self) -> ScopeKey {
        (self.guild_id, self.user_id)
    }

    /// Seconds until expiry, clamped at zero once due.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

/// Registry of pending reminders for every scope.
pub struct ReminderStore {
    scopes: DashMap<ScopeKey, Vec<Reminder>>,
    next_id: AtomicU64,
}

impl ReminderStore {
    pub fn new() -> Self {
        ReminderStore {
            scopes: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Hand out the next reminder id. Ids are monotonically increasing
    /// and independent of where the reminder is stored.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of pending reminders for a scope; 0 for unseen scopes.
    pub fn count(&self, scope: ScopeKey) -> usize {
        self.scopes.get(&scope).map_or(0, |entries| entries.len())
    }

    pub fn is_at_capacity(&self, scope: ScopeKey) -> bool {
        self.count(scope) >= MAX_REMINDERS
    }

    /// Append a reminder to its scope.
    ///
    /// The capacity check here is the authoritative one: it runs under the
    /// scope's entry lock, so a concurrent create cannot slip a fifth
    /// reminder past a caller's earlier `is_at_capacity` check.
    pub fn insert(&self, reminder: Reminder) -> Result<(), ReminderError> {
        let mut entries = self.scopes.entry(reminder.scope()).or_default();
        if entries.len() >= MAX_REMINDERS {
            return Err(ReminderError::CapacityExceeded);
        }
        entries.push(reminder);
        Ok(())
    }

    pub fn get(&self, scope: ScopeKey, id: u64) -> Option<Reminder> {
        self.scopes
            .get(&scope)?
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Detach and return a reminder.
    ///
    /// This is the take-once arbitration point between deletion and
    /// firing: exactly one caller gets the reminder, every other caller
    /// sees it already gone.
    pub fn remove(&self, scope: ScopeKey, id: u64) -> Option<Reminder> {
        let mut entries = self.scopes.get_mut(&scope)?;
        let index = entries.iter().position(|r| r.id == id)?;
        Some(entries.remove(index))
    }

    /// Mutate a reminder in place and return the updated copy.
    pub fn update<F>(&self, scope: ScopeKey, id: u64, mutate: F) -> Option<Reminder>
    where
        F: FnOnce(&mut Reminder),
    {
        let mut entries = self.scopes.get_mut(&scope)?;
        let reminder = entries.iter_mut().find(|r| r.id == id)?;
        mutate(reminder);
        Some(reminder.clone())
    }

    /// All of a scope's reminders, ordered by creation time ascending
    /// (stable, so same-instant creations keep insertion order).
    pub fn list(&self, scope: ScopeKey) -> Vec<Reminder> {
        let mut entries = self
            .scopes
            .get(&scope)
            .map_or_else(Vec::new, |entries| entries.clone());
        entries.sort_by_key(|r| r.created_at);
        entries
    }

    /// Remove and return every reminder for a scope.
    pub fn clear(&self, scope: ScopeKey) -> Vec<Reminder> {
        self.scopes
            .remove(&scope)
            .map(|(_, entries)| entries)
            .unwrap_or_default()
    }
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOPE: ScopeKey = (10, 20);

    fn base_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn make_reminder(store: &ReminderStore, scope: ScopeKey, created_offset: i64) -> Reminder {
        let created_at = base_time() + chrono::Duration::seconds(created_offset);
        Reminder {
            id: store.next_id(),
            guild_id: scope.0,
            user_id: scope.1,
            channel_id: 555,
            message: "do the thing".to_string(),
            created_at,
            expires_at: created_at + chrono::Duration::seconds(3600),
        }
    }

    #[test]
    fn test_ids_are_monotonic() {
        let store = ReminderStore::new();
        let first = store.next_id();
        let second = store.next_id();
        assert!(second > first);
    }

    #[test]
    fn test_count_unseen_scope_is_zero() {
        let store = ReminderStore::new();
        assert_eq!(store.count(SCOPE), 0);
        assert!(!store.is_at_capacity(SCOPE));
    }

    #[test]
    fn test_insert_enforces_capacity() {
        let store = ReminderStore::new();
        for i in 0..MAX_REMINDERS {
            let reminder = make_reminder(&store, SCOPE, i as i64);
            assert!(store.insert(reminder).is_ok());
        }
        assert!(store.is_at_capacity(SCOPE));

        let overflow = make_reminder(&store, SCOPE, 99);
        assert_eq!(
            store.insert(overflow),
            Err(ReminderError::CapacityExceeded)
        );
        // The existing reminders are untouched
        assert_eq!(store.count(SCOPE), MAX_REMINDERS);
    }

    #[test]
    fn test_capacity_is_per_scope() {
        let store = ReminderStore::new();
        for i in 0..MAX_REMINDERS {
            store.insert(make_reminder(&store, SCOPE, i as i64)).unwrap();
        }
        let other_scope = (10, 21);
        assert!(!store.is_at_capacity(other_scope));
        assert!(store.insert(make_reminder(&store, other_scope, 0)).is_ok());
    }

    #[test]
    fn test_get_and_remove() {
        let store = ReminderStore::new();
        let reminder = make_reminder(&store, SCOPE, 0);
        let id = reminder.id;
        store.insert(reminder).unwrap();

        assert_eq!(store.get(SCOPE, id).unwrap().id, id);

        let removed = store.remove(SCOPE, id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(store.count(SCOPE), 0);

        // Second remove finds nothing
        assert!(store.remove(SCOPE, id).is_none());
        assert!(store.get(SCOPE, id).is_none());
    }

    #[test]
    fn test_remove_unknown_id_leaves_scope_untouched() {
        let store = ReminderStore::new();
        store.insert(make_reminder(&store, SCOPE, 0)).unwrap();
        assert!(store.remove(SCOPE, 9999).is_none());
        assert_eq!(store.count(SCOPE), 1);
    }

    #[test]
    fn test_update_mutates_in_place() {
        let store = ReminderStore::new();
        let reminder = make_reminder(&store, SCOPE, 0);
        let id = reminder.id;
        store.insert(reminder).unwrap();

        let updated = store
            .update(SCOPE, id, |r| r.message = "changed".to_string())
            .unwrap();
        assert_eq!(updated.message, "changed");
        assert_eq!(store.get(SCOPE, id).unwrap().message, "changed");

        assert!(store.update(SCOPE, 9999, |_| {}).is_none());
    }

    #[test]
    fn test_list_orders_by_creation_time() {
        let store = ReminderStore::new();
        let newer = make_reminder(&store, SCOPE, 50);
        let older = make_reminder(&store, SCOPE, 0);
        let newer_id = newer.id;
        let older_id = older.id;
        store.insert(newer).unwrap();
        store.insert(older).unwrap();

        let listed = store.list(SCOPE);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, older_id);
        assert_eq!(listed[1].id, newer_id);
    }

    #[test]
    fn test_list_ties_keep_insertion_order() {
        let store = ReminderStore::new();
        let first = make_reminder(&store, SCOPE, 0);
        let second = make_reminder(&store, SCOPE, 0);
        let first_id = first.id;
        let second_id = second.id;
        store.insert(first).unwrap();
        store.insert(second).unwrap();

        let listed = store.list(SCOPE);
        assert_eq!(listed[0].id, first_id);
        assert_eq!(listed[1].id, second_id);
    }

    #[test]
    fn test_clear_returns_everything() {
        let store = ReminderStore::new();
        for i in 0..3 {
            store.insert(make_reminder(&store, SCOPE, i)).unwrap();
        }
        let removed = store.clear(SCOPE);
        assert_eq!(removed.len(), 3);
        assert_eq!(store.count(SCOPE), 0);
        assert!(store.list(SCOPE).is_empty());

        // Clearing an empty scope is a no-op
        assert!(store.clear(SCOPE).is_empty());
    }

    #[test]
    fn test_remaining_seconds_clamps_at_zero() {
        let store = ReminderStore::new();
        let reminder = make_reminder(&store, SCOPE, 0);
        let now = reminder.expires_at + chrono::Duration::seconds(30);
        assert_eq!(reminder.remaining_seconds(now), 0);

        let halfway = reminder.created_at + chrono::Duration::seconds(1800);
        assert_eq!(reminder.remaining_seconds(halfway), 1800);
    }
}
