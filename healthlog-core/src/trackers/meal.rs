use crate::date_key::DateKey;
use crate::models::{PhotoPayload, DEFAULT_MEAL_COUNT, MAX_SLOT_COUNT};
use crate::store::RecordStore;

/// What to do with a meal slot's photo on update.
///
/// `Keep` is "not supplied"; `Clear` is an explicit removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PhotoUpdate {
    #[default]
    Keep,
    Set(PhotoPayload),
    Clear,
}

impl From<Option<PhotoPayload>> for PhotoUpdate {
    fn from(photo: Option<PhotoPayload>) -> Self {
        match photo {
            Some(payload) => PhotoUpdate::Set(payload),
            None => PhotoUpdate::Clear,
        }
    }
}

/// Meal slot configuration, entries and completion.
pub struct MealTracker<'a> {
    store: &'a mut RecordStore,
}

impl<'a> MealTracker<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Set the number of meal slots and their labels. Existing slots keep
    /// their position; labels are truncated or padded with ordinal labels.
    /// A count of zero or above [`MAX_SLOT_COUNT`] falls back to 4.
    pub fn configure<S: AsRef<str>>(&mut self, key: DateKey, count: usize, labels: &[S]) {
        let count = if count == 0 || count > MAX_SLOT_COUNT {
            tracing::debug!("Meal count {} for {}, using {}", count, key, DEFAULT_MEAL_COUNT);
            DEFAULT_MEAL_COUNT
        } else {
            count
        };

        self.store.put(key, |mut day| {
            day.meals = day.meals.reconfigured(count, labels);
            day
        });
    }

    /// Partial update of one meal.
    ///
    /// `food` always replaces. `time` replaces only when `Some` and
    /// non-empty. `photo` replaces or clears only when not
    /// [`PhotoUpdate::Keep`].
    pub fn set_entry(
        &mut self,
        key: DateKey,
        index: usize,
        food: impl Into<String>,
        time: Option<&str>,
        photo: PhotoUpdate,
    ) -> bool {
        if !self.has_slot(key, index) {
            return false;
        }
        let food = food.into();
        let time = time.filter(|t| !t.is_empty()).map(str::to_string);

        self.store.put(key, |mut day| {
            day.meals = day.meals.with_slot(index, |mut slot| {
                slot.food = food;
                if let Some(time) = time {
                    slot.time = time;
                }
                match photo {
                    PhotoUpdate::Keep => {}
                    PhotoUpdate::Set(payload) => slot.photo = Some(payload),
                    PhotoUpdate::Clear => slot.photo = None,
                }
                slot
            });
            day
        });
        true
    }

    /// Replace only the photo of one meal, leaving food and time alone.
    pub fn set_photo(&mut self, key: DateKey, index: usize, photo: Option<PhotoPayload>) -> bool {
        if !self.has_slot(key, index) {
            return false;
        }
        self.store.put(key, |mut day| {
            day.meals = day.meals.with_slot(index, |mut slot| {
                slot.photo = photo;
                slot
            });
            day
        });
        true
    }

    /// Flip one meal's completion, whether or not food was entered.
    pub fn toggle_complete(&mut self, key: DateKey, index: usize) -> bool {
        if !self.has_slot(key, index) {
            return false;
        }
        self.store.put(key, |mut day| {
            day.meals = day.meals.with_slot(index, |mut slot| {
                slot.completed = !slot.completed;
                slot
            });
            day
        });
        true
    }

    fn has_slot(&mut self, key: DateKey, index: usize) -> bool {
        let count = self.store.get(key).meals.count();
        if index >= count {
            tracing::warn!(
                "Meal slot {} out of range for {} ({} slots)",
                index,
                key,
                count
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;

    fn key() -> DateKey {
        DateKey::parse("2024-03-05").unwrap()
    }

    fn photo() -> PhotoPayload {
        PhotoPayload::new("data:image/jpeg;base64,/9j/")
    }

    #[test]
    fn test_meal_scenario() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        meals.configure(key(), 2, &["Breakfast", "Dinner"]);
        assert!(meals.set_entry(key(), 0, "Eggs", Some("08:00"), PhotoUpdate::Keep));
        assert!(meals.toggle_complete(key(), 0));

        let day = store.get(key());
        let first = day.meals.slot(0).unwrap();
        assert_eq!(first.food, "Eggs");
        assert_eq!(first.time, "08:00");
        assert!(first.completed);
        assert_eq!(day.meals.label(0), Some("Breakfast"));
        assert_eq!(day.meals.label(1), Some("Dinner"));
        assert_eq!(day.meals.slot(1), Some(&MealSlot::default()));
    }

    #[test]
    fn test_partial_update_keeps_time_and_photo() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        meals.set_entry(key(), 1, "Rice", Some("12:30"), PhotoUpdate::Set(photo()));
        meals.set_entry(key(), 1, "Soup", None, PhotoUpdate::Keep);

        let slot = store.get(key()).meals.slot(1).unwrap().clone();
        assert_eq!(slot.food, "Soup");
        assert_eq!(slot.time, "12:30");
        assert_eq!(slot.photo, Some(photo()));
    }

    #[test]
    fn test_empty_time_is_not_supplied() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        meals.set_entry(key(), 0, "Toast", Some("07:15"), PhotoUpdate::Keep);
        meals.set_entry(key(), 0, "Toast", Some(""), PhotoUpdate::Keep);

        assert_eq!(store.get(key()).meals.slot(0).unwrap().time, "07:15");
    }

    #[test]
    fn test_explicit_photo_clear() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        meals.set_entry(key(), 0, "Salad", None, PhotoUpdate::Set(photo()));
        meals.set_entry(key(), 0, "Salad", None, PhotoUpdate::Clear);

        assert_eq!(store.get(key()).meals.slot(0).unwrap().photo, None);
    }

    #[test]
    fn test_photo_update_from_option() {
        assert_eq!(PhotoUpdate::from(Some(photo())), PhotoUpdate::Set(photo()));
        assert_eq!(PhotoUpdate::from(None), PhotoUpdate::Clear);
    }

    #[test]
    fn test_set_photo_only() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        meals.set_entry(key(), 2, "Apple", Some("15:00"), PhotoUpdate::Keep);
        meals.set_photo(key(), 2, Some(photo()));

        let slot = store.get(key()).meals.slot(2).unwrap().clone();
        assert_eq!(slot.food, "Apple");
        assert_eq!(slot.time, "15:00");
        assert_eq!(slot.photo, Some(photo()));
    }

    #[test]
    fn test_toggle_without_food() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        assert!(meals.toggle_complete(key(), 3));
        assert!(meals.toggle_complete(key(), 3));
        assert!(meals.toggle_complete(key(), 3));

        assert!(store.get(key()).meals.slot(3).unwrap().completed);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut store = RecordStore::new();
        let mut meals = MealTracker::new(&mut store);

        assert!(!meals.set_entry(key(), 4, "Pizza", None, PhotoUpdate::Keep));
        assert!(!meals.toggle_complete(key(), 4));
        assert!(!meals.set_photo(key(), 10, None));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_configure_pads_labels() {
        let mut store = RecordStore::new();
        MealTracker::new(&mut store).configure(key(), 3, &["Brunch"]);

        let day = store.get(key());
        assert_eq!(day.meals.labels(), &["Brunch", "2번째", "3번째"]);
        assert_eq!(day.meals.records().len(), 3);
    }

    #[test]
    fn test_configure_zero_uses_default_count() {
        let mut store = RecordStore::new();
        let labels: [&str; 0] = [];
        MealTracker::new(&mut store).configure(key(), 0, &labels);

        assert_eq!(store.get(key()).meals.count(), 4);
    }

    #[test]
    fn test_configure_oversized_count_uses_default() {
        let mut store = RecordStore::new();
        MealTracker::new(&mut store).configure(key(), usize::MAX, &["Brunch"]);

        let day = store.get(key());
        assert_eq!(day.meals.count(), 4);
        assert_eq!(day.meals.labels(), &["Brunch", "2번째", "3번째", "4번째"]);
    }
}
