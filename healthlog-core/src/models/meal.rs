use serde::Serialize;
use std::fmt;

use crate::resize::{resize, resize_labels};

/// Labels of a fresh day's meal slots
pub const DEFAULT_MEAL_LABELS: [&str; 4] = ["아침", "점심", "간식", "저녁"];

/// Label presets offered when the meal count changes in the settings form
pub const PRESET_MEAL_LABELS: [&str; 6] = ["아침", "점심", "간식", "저녁", "야식", "간식2"];

/// Number of meal slots on a fresh day
pub const DEFAULT_MEAL_COUNT: usize = DEFAULT_MEAL_LABELS.len();

/// An opaque photo reference, typically a `data:` URI.
///
/// The core stores and clears it but never looks inside.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhotoPayload(String);

impl PhotoPayload {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Payloads are whole images; keep them out of debug output.
impl fmt::Debug for PhotoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoPayload({} bytes)", self.0.len())
    }
}

/// One meal of the day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealSlot {
    pub food: String,
    pub completed: bool,
    /// Time the meal was eaten, as entered (`08:00`)
    pub time: String,
    pub photo: Option<PhotoPayload>,
}

impl MealSlot {
    /// Button text: the food, or a prompt when nothing is entered yet.
    pub fn display_label(&self) -> &str {
        if self.food.is_empty() {
            "메뉴 입력"
        } else {
            &self.food
        }
    }
}

/// A day's meal plan: one label per slot, one slot per meal.
///
/// `count`, the number of labels and the number of records only change
/// together, through `reconfigured`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealRecord {
    count: usize,
    labels: Vec<String>,
    records: Vec<MealSlot>,
}

impl Default for MealRecord {
    fn default() -> Self {
        Self {
            count: DEFAULT_MEAL_COUNT,
            labels: resize_labels(&DEFAULT_MEAL_LABELS, DEFAULT_MEAL_COUNT),
            records: resize(&[], DEFAULT_MEAL_COUNT, MealSlot::default),
        }
    }
}

impl MealRecord {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn records(&self) -> &[MealSlot] {
        &self.records
    }

    pub fn slot(&self, index: usize) -> Option<&MealSlot> {
        self.records.get(index)
    }

    /// Number of slots marked completed
    pub fn completed_count(&self) -> usize {
        self.records.iter().filter(|slot| slot.completed).count()
    }

    /// A copy with `count` slots labelled from `labels` (truncated, or padded
    /// with ordinal labels). Callers validate `count >= 1` first.
    pub(crate) fn reconfigured<S: AsRef<str>>(&self, count: usize, labels: &[S]) -> Self {
        debug_assert!(count >= 1);
        Self {
            count,
            labels: resize_labels(labels, count),
            records: resize(&self.records, count, MealSlot::default),
        }
    }

    /// Apply `update` to the slot at `index`; out-of-range leaves the record
    /// as it was.
    pub(crate) fn with_slot(mut self, index: usize, update: impl FnOnce(MealSlot) -> MealSlot) -> Self {
        if let Some(slot) = self.records.get_mut(index) {
            *slot = update(std::mem::take(slot));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let meals = MealRecord::default();
        assert_eq!(meals.count(), 4);
        assert_eq!(meals.labels(), &["아침", "점심", "간식", "저녁"]);
        assert_eq!(meals.records().len(), 4);
        assert_eq!(meals.completed_count(), 0);
    }

    #[test]
    fn test_reconfigured_keeps_slots_by_position() {
        let meals = MealRecord::default().with_slot(1, |mut s| {
            s.food = "Bibimbap".to_string();
            s
        });

        let grown = meals.reconfigured(6, &["Breakfast", "Lunch"]);
        assert_eq!(grown.count(), 6);
        assert_eq!(grown.records().len(), 6);
        assert_eq!(grown.labels().len(), 6);
        assert_eq!(grown.slot(1).unwrap().food, "Bibimbap");
        assert_eq!(grown.label(5), Some("6번째"));

        let shrunk = grown.reconfigured(1, &["Only"]);
        assert_eq!(shrunk.labels(), &["Only"]);
        assert_eq!(shrunk.records().len(), 1);
        assert_eq!(shrunk.slot(1), None);
    }

    #[test]
    fn test_photo_debug_hides_payload() {
        let photo = PhotoPayload::new("data:image/png;base64,AAAA");
        let debug = format!("{:?}", photo);
        assert!(!debug.contains("base64"));
        assert!(debug.contains("26 bytes"));
    }

    #[test]
    fn test_display_label() {
        let mut slot = MealSlot::default();
        assert_eq!(slot.display_label(), "메뉴 입력");
        slot.food = "Salad".to_string();
        assert_eq!(slot.display_label(), "Salad");
    }

    #[test]
    fn test_serialize_photo_as_string() {
        let slot = MealSlot {
            food: "Eggs".to_string(),
            photo: Some(PhotoPayload::new("data:x")),
            ..Default::default()
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["photo"], "data:x");
        assert_eq!(json["food"], "Eggs");
    }
}
