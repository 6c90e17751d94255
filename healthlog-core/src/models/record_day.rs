use serde::Serialize;

use super::exercise::Exercise;
use super::meal::MealRecord;
use super::water::WaterRecord;

/// Everything recorded for one calendar day.
///
/// [`RecordDay::default`] is the one place a fresh day is built: eight
/// empty water slots against a 2000 ml target, four labelled meal slots, no
/// exercise and no weight. A day never inherits another day's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordDay {
    pub water: WaterRecord,
    pub meals: MealRecord,
    pub exercise: Exercise,
    /// Free text as typed; empty means not recorded
    pub weight: String,
}

impl RecordDay {
    pub fn has_weight(&self) -> bool {
        !self.weight.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_day() {
        let day = RecordDay::default();
        assert_eq!(day.water.count(), 8);
        assert_eq!(day.water.target_amount(), 2000);
        assert_eq!(day.meals.count(), 4);
        assert_eq!(day.meals.labels().len(), 4);
        assert_eq!(day.exercise, Exercise::default());
        assert!(!day.has_weight());
    }

    #[test]
    fn test_defaults_are_structurally_equal() {
        assert_eq!(RecordDay::default(), RecordDay::default());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(RecordDay::default()).unwrap();
        assert_eq!(json["water"]["count"], 8);
        assert_eq!(json["water"]["target_amount"], 2000);
        assert_eq!(json["meals"]["labels"][0], "아침");
        assert_eq!(json["weight"], "");
    }
}
