//! healthlog core library
//!
//! Date-keyed daily health records (water, meals, exercise, weight), the
//! trackers that change them, the weight trend, and the edit-session
//! workflow that stages changes before they reach the store.

pub mod clock;
pub mod date_key;
pub mod models;
pub mod numeric;
pub mod resize;
pub mod session;
pub mod settings;
pub mod store;
pub mod trackers;
pub mod trend;

pub use clock::{Clock, ClockFormat, FixedClock, SystemClock};
pub use date_key::{DateKey, DateKeyError};
pub use models::{
    Exercise, MealRecord, MealSlot, PhotoPayload, RecordDay, WaterRecord, WaterSlot,
    MAX_SLOT_COUNT,
};
pub use resize::{resize, resize_labels};
pub use session::{Committed, Draft, EditSession, EditTarget, FieldDelta, SessionError};
pub use settings::{ExerciseEntry, MealSettings, WaterSettings};
pub use store::RecordStore;
pub use trackers::{ExerciseLog, MealTracker, PhotoUpdate, WaterProgress, WaterTracker, WeightLog};
pub use trend::{weight_series, WeightPoint, WeightSeries};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
