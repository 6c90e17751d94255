use serde::Serialize;
use std::fmt;

use crate::clock::Clock;
use crate::date_key::DateKey;
use crate::models::{WaterRecord, DEFAULT_WATER_COUNT, DEFAULT_WATER_TARGET_ML, MAX_SLOT_COUNT};
use crate::numeric::amount_value;
use crate::store::RecordStore;

/// Water intake against the day's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaterProgress {
    /// Millilitres from completed slots, rounded
    pub current: u64,
    pub target: u32,
    /// `0..=100`; exactly 100 once `current` reaches `target`. Values short
    /// of the target never round up to 100, so they stop at 99.
    pub percentage: u8,
}

impl WaterProgress {
    pub fn of(water: &WaterRecord) -> Self {
        let total: f64 = water
            .records()
            .iter()
            .filter(|slot| slot.completed() && !slot.amount().is_empty())
            .map(|slot| amount_value(slot.amount()))
            .sum();

        Self::from_total(total, water.target_amount())
    }

    fn from_total(total: f64, target: u32) -> Self {
        let target = target.max(1);
        let current = total.round() as u64;

        let percentage = if current >= u64::from(target) {
            100
        } else {
            // Rounding must not report 100% while still short of the target.
            let ratio = (total / f64::from(target)).min(1.0);
            ((ratio * 100.0).round() as u8).min(99)
        };

        Self {
            current,
            target,
            percentage,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }
}

impl Default for WaterProgress {
    fn default() -> Self {
        Self {
            current: 0,
            target: DEFAULT_WATER_TARGET_ML,
            percentage: 0,
        }
    }
}

impl fmt::Display for WaterProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}ml / {}ml ({}%)",
            self.current, self.target, self.percentage
        )
    }
}

/// Water slot configuration, amounts, completion and progress.
pub struct WaterTracker<'a> {
    store: &'a mut RecordStore,
}

impl<'a> WaterTracker<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Set the number of slots and the daily target. Existing slots keep
    /// their position. A zero target, or a count of zero or above
    /// [`MAX_SLOT_COUNT`], falls back to the default (8 slots, 2000 ml).
    pub fn configure(&mut self, key: DateKey, count: usize, target_amount: u32) {
        let count = if count == 0 || count > MAX_SLOT_COUNT {
            tracing::debug!(
                "Water count {} for {}, using {}",
                count,
                key,
                DEFAULT_WATER_COUNT
            );
            DEFAULT_WATER_COUNT
        } else {
            count
        };
        let target_amount = if target_amount == 0 {
            tracing::debug!(
                "Water target 0 for {}, using {}",
                key,
                DEFAULT_WATER_TARGET_ML
            );
            DEFAULT_WATER_TARGET_ML
        } else {
            target_amount
        };

        self.store.put(key, |mut day| {
            day.water = day.water.reconfigured(count, target_amount);
            day
        });
    }

    /// Replace the amount text of one slot, keeping its completion state.
    pub fn set_amount(&mut self, key: DateKey, index: usize, amount: impl Into<String>) -> bool {
        if !self.has_slot(key, index) {
            return false;
        }
        let amount = amount.into();
        self.store.put(key, |mut day| {
            day.water = day.water.with_slot(index, |slot| slot.with_amount(amount));
            day
        });
        true
    }

    /// Flip one slot's completion. Completing stamps the clock's display
    /// time; un-completing clears it. The slot's amount may be empty.
    pub fn toggle_complete(&mut self, key: DateKey, index: usize, clock: &dyn Clock) -> bool {
        if !self.has_slot(key, index) {
            return false;
        }
        let stamp = clock.now_display();
        self.store.put(key, |mut day| {
            day.water = day.water.with_slot(index, |slot| slot.toggled(stamp));
            day
        });
        true
    }

    /// Progress for `key`. A day that was never touched reports zero against
    /// the default target.
    pub fn progress(&self, key: DateKey) -> WaterProgress {
        self.store
            .peek(key)
            .map(|day| WaterProgress::of(&day.water))
            .unwrap_or_default()
    }

    fn has_slot(&mut self, key: DateKey, index: usize) -> bool {
        let count = self.store.get(key).water.count();
        if index >= count {
            tracing::warn!(
                "Water slot {} out of range for {} ({} slots)",
                index,
                key,
                count
            );
            return false;
        }
        true
    }
}
