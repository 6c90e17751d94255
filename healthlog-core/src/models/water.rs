use serde::Serialize;

use crate::resize::resize;

/// Number of water slots on a fresh day
pub const DEFAULT_WATER_COUNT: usize = 8;
/// Daily water target on a fresh day, in millilitres
pub const DEFAULT_WATER_TARGET_ML: u32 = 2000;

/// Stamp used if a clock ever hands back an empty string, so a completed
/// slot always has a time.
const UNKNOWN_TIME: &str = "--:--";

/// One drink of water.
///
/// `time` is non-empty exactly when `completed` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WaterSlot {
    amount: String,
    completed: bool,
    time: String,
}

impl WaterSlot {
    /// Free text as typed, e.g. `300ml`
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Display time of completion; empty while incomplete
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Replace the amount, keeping completion state and time.
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Flip completion. Becoming complete records `stamp`; becoming
    /// incomplete clears the time.
    pub fn toggled(mut self, stamp: impl Into<String>) -> Self {
        self.completed = !self.completed;
        self.time = if self.completed {
            let stamp = stamp.into();
            if stamp.is_empty() {
                UNKNOWN_TIME.to_string()
            } else {
                stamp
            }
        } else {
            String::new()
        };
        self
    }

    /// Button text: the amount, or `N번` for an empty slot at `index`.
    pub fn display_label(&self, index: usize) -> String {
        if self.amount.is_empty() {
            format!("{}번", index + 1)
        } else {
            self.amount.clone()
        }
    }

    /// Completion control text, e.g. `완료 14:05`.
    pub fn toggle_label(&self) -> String {
        if self.completed {
            format!("완료 {}", self.time)
        } else {
            "완료".to_string()
        }
    }
}

/// A day's water plan and intake.
///
/// `count` always equals the length of `records`: both change only through
/// `reconfigured`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterRecord {
    count: usize,
    target_amount: u32,
    records: Vec<WaterSlot>,
}

impl Default for WaterRecord {
    fn default() -> Self {
        Self {
            count: DEFAULT_WATER_COUNT,
            target_amount: DEFAULT_WATER_TARGET_ML,
            records: resize(&[], DEFAULT_WATER_COUNT, WaterSlot::default),
        }
    }
}

impl WaterRecord {
    pub fn count(&self) -> usize {
        self.count
    }

    /// Daily target in millilitres, always greater than zero
    pub fn target_amount(&self) -> u32 {
        self.target_amount
    }

    pub fn records(&self) -> &[WaterSlot] {
        &self.records
    }

    pub fn slot(&self, index: usize) -> Option<&WaterSlot> {
        self.records.get(index)
    }

    /// A copy with `count` slots and a new target. Slots that keep their
    /// position keep their contents. Callers validate both values first.
    pub(crate) fn reconfigured(&self, count: usize, target_amount: u32) -> Self {
        debug_assert!(count >= 1 && target_amount > 0);
        Self {
            count,
            target_amount,
            records: resize(&self.records, count, WaterSlot::default),
        }
    }

    /// Apply `update` to the slot at `index`; out-of-range leaves the record
    /// as it was.
    pub(crate) fn with_slot(mut self, index: usize, update: impl FnOnce(WaterSlot) -> WaterSlot) -> Self {
        if let Some(slot) = self.records.get_mut(index) {
            *slot = update(std::mem::take(slot));
        }
        self
    }
}
