//! Operations over one part of a [`RecordDay`](crate::models::RecordDay).
//!
//! Trackers borrow the store for the duration of a call and write through
//! [`RecordStore::put`](crate::store::RecordStore::put); they never keep a
//! copy of a day. Slot indices are 0-based, and an out-of-range index leaves
//! the store untouched and returns `false`.

mod exercise;
mod meal;
mod water;
mod weight;

pub use exercise::ExerciseLog;
pub use meal::{MealTracker, PhotoUpdate};
pub use water::{WaterProgress, WaterTracker};
pub use weight::WeightLog;
