//! Comma-joined settings text exchanged with the editing UI.
//!
//! Water settings travel as `"<count>,<target>"`, meal settings as
//! `"<count>,<label1>,<label2>,..."` and exercise as `"<type>,<duration>"`.
//! Parsing never fails: missing or malformed fields take their defaults.

use std::fmt;

use crate::models::{
    DEFAULT_MEAL_COUNT, DEFAULT_WATER_COUNT, DEFAULT_WATER_TARGET_ML, MAX_SLOT_COUNT,
    PRESET_MEAL_LABELS,
};
use crate::numeric::positive_int;

/// Water slot count and daily target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterSettings {
    pub count: usize,
    pub target_amount: u32,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_WATER_COUNT,
            target_amount: DEFAULT_WATER_TARGET_ML,
        }
    }
}

impl WaterSettings {
    pub fn parse(text: &str) -> Self {
        let mut fields = text.split(',');
        let count = fields
            .next()
            .and_then(slot_count)
            .unwrap_or(DEFAULT_WATER_COUNT);
        let target_amount = fields
            .next()
            .and_then(positive_int)
            .unwrap_or(DEFAULT_WATER_TARGET_ML);

        Self {
            count,
            target_amount,
        }
    }

    /// Replace the count field of `text`, keeping its target (or the default
    /// target when absent).
    pub fn with_count_text(text: &str, count: &str) -> String {
        let target = field(text, 1).unwrap_or_else(|| DEFAULT_WATER_TARGET_ML.to_string());
        format!("{},{}", count.trim(), target)
    }

    /// Replace the target field of `text`, keeping its count (or the default
    /// count when absent).
    pub fn with_target_text(text: &str, target: &str) -> String {
        let count = field(text, 0).unwrap_or_else(|| DEFAULT_WATER_COUNT.to_string());
        format!("{},{}", count, target.trim())
    }
}

impl fmt::Display for WaterSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.count, self.target_amount)
    }
}

/// Meal slot count and labels.
///
/// Labels are passed through as given; the tracker pads or truncates them
/// to `count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealSettings {
    pub count: usize,
    pub labels: Vec<String>,
}

impl MealSettings {
    pub fn parse(text: &str) -> Self {
        let mut fields = text.split(',');
        let count = fields
            .next()
            .and_then(slot_count)
            .unwrap_or(DEFAULT_MEAL_COUNT);
        let labels = fields.map(|label| label.trim().to_string()).collect();

        Self { count, labels }
    }

    /// Settings text for a new count, with labels reset from the preset list.
    /// Non-numeric or oversized count text is treated as 4.
    pub fn with_count_text(count: &str) -> String {
        let count = slot_count(count).unwrap_or(DEFAULT_MEAL_COUNT);
        let labels: Vec<&str> = PRESET_MEAL_LABELS.iter().copied().take(count).collect();
        format!("{},{}", count, labels.join(","))
    }

    /// Replace the labels part of `text`, keeping its count (or 4 when
    /// absent).
    pub fn with_labels_text(text: &str, labels: &str) -> String {
        let count = field(text, 0).unwrap_or_else(|| DEFAULT_MEAL_COUNT.to_string());
        format!("{},{}", count, labels.trim())
    }
}

impl fmt::Display for MealSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)?;
        for label in &self.labels {
            write!(f, ",{}", label)?;
        }
        Ok(())
    }
}

/// Exercise type and duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub kind: String,
    pub duration: String,
}

impl ExerciseEntry {
    /// Only the first two fields count; `"런닝, 30분"` is running for 30분.
    pub fn parse(text: &str) -> Self {
        let mut fields = text.split(',').map(str::trim);
        let kind = fields.next().unwrap_or_default().to_string();
        let duration = fields.next().unwrap_or_default().to_string();

        Self { kind, duration }
    }
}

impl fmt::Display for ExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_empty() && self.duration.is_empty() {
            Ok(())
        } else {
            write!(f, "{},{}", self.kind, self.duration)
        }
    }
}

/// A slot count between 1 and [`MAX_SLOT_COUNT`].
fn slot_count(text: &str) -> Option<usize> {
    positive_int(text).filter(|count| *count <= MAX_SLOT_COUNT)
}

/// Trimmed field `index` of comma-joined `text`, if present and non-empty.
fn field(text: &str, index: usize) -> Option<String> {
    text.split(',')
        .nth(index)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
}
