mod exercise;
mod meal;
mod record_day;
mod water;

pub use exercise::Exercise;
pub use meal::{
    MealRecord, MealSlot, PhotoPayload, DEFAULT_MEAL_COUNT, DEFAULT_MEAL_LABELS,
    PRESET_MEAL_LABELS,
};
pub use record_day::RecordDay;
pub use water::{WaterRecord, WaterSlot, DEFAULT_WATER_COUNT, DEFAULT_WATER_TARGET_ML};

/// Most water or meal slots a day can have. Larger counts are treated as
/// malformed and fall back to the default count.
pub const MAX_SLOT_COUNT: usize = 100;
