use crate::date_key::DateKey;
use crate::models::Exercise;
use crate::store::RecordStore;

/// The day's single exercise entry.
pub struct ExerciseLog<'a> {
    store: &'a mut RecordStore,
}

impl<'a> ExerciseLog<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Record the exercise type and duration. Recording marks it completed.
    pub fn set_exercise(
        &mut self,
        key: DateKey,
        kind: impl Into<String>,
        duration: impl Into<String>,
    ) {
        let exercise = Exercise::recorded(kind, duration);
        self.store.put(key, |mut day| {
            day.exercise = exercise;
            day
        });
    }
}
