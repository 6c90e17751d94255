//! In-memory record store keyed by date.
//!
//! The store owns every [`RecordDay`]. Days are created on first access and
//! live until the store is dropped. All writes go through [`RecordStore::put`],
//! which replaces the whole day with the updater's result.

use std::collections::HashMap;

use crate::date_key::DateKey;
use crate::models::RecordDay;

/// Date-keyed store of daily records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    days: HashMap<DateKey, RecordDay>,
    revision: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the day for `key`, creating the default day if none exists.
    ///
    /// Creation happens at most once per key; repeated calls return the
    /// same entry.
    pub fn get(&mut self, key: DateKey) -> &RecordDay {
        self.days.entry(key).or_insert_with(|| {
            tracing::debug!("Created record day {}", key);
            RecordDay::default()
        })
    }

    /// Returns the day for `key` without creating it.
    pub fn peek(&self, key: DateKey) -> Option<&RecordDay> {
        self.days.get(&key)
    }

    pub fn contains(&self, key: DateKey) -> bool {
        self.days.contains_key(&key)
    }

    /// Replaces the day for `key` with `updater(current)`.
    ///
    /// An unseen key starts from the default day.
    pub fn put(&mut self, key: DateKey, updater: impl FnOnce(RecordDay) -> RecordDay) {
        let current = self.days.remove(&key).unwrap_or_default();
        self.days.insert(key, updater(current));
        self.revision += 1;
        tracing::debug!("Replaced record day {} (revision {})", key, self.revision);
    }

    /// Every stored day, in no particular order.
    pub fn all_entries(&self) -> impl Iterator<Item = (DateKey, &RecordDay)> + '_ {
        self.days.iter().map(|(key, day)| (*key, day))
    }

    /// Number of `put` calls so far. Views compare revisions to detect
    /// changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
