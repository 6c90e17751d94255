//! Edit sessions: open a draft of one part of a day, change it, then commit
//! or cancel.
//!
//! A draft is a copy. Nothing reaches the store until [`EditSession::commit`],
//! which hands the whole draft to the matching tracker in one call. Opening
//! while a session is open replaces the previous draft.

use std::fmt;
use thiserror::Error;

use crate::date_key::DateKey;
use crate::models::{PhotoPayload, RecordDay};
use crate::settings::{ExerciseEntry, MealSettings, WaterSettings};
use crate::store::RecordStore;
use crate::trackers::{ExerciseLog, MealTracker, PhotoUpdate, WaterTracker, WeightLog};

/// Errors from using a session in the wrong state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No edit in progress")]
    NotOpen,

    #[error("Cannot set {field} while editing {target}")]
    InapplicableField {
        field: &'static str,
        target: EditTarget,
    },
}

/// What an edit session is editing. Slot indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Water(usize),
    WaterSettings,
    Meal(usize),
    MealSettings,
    Weight,
    Exercise,
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditTarget::Water(index) => write!(f, "water #{}", index + 1),
            EditTarget::WaterSettings => write!(f, "water settings"),
            EditTarget::Meal(index) => write!(f, "meal #{}", index + 1),
            EditTarget::MealSettings => write!(f, "meal settings"),
            EditTarget::Weight => write!(f, "weight"),
            EditTarget::Exercise => write!(f, "exercise"),
        }
    }
}

/// The working copy held by an open session, shaped per target.
///
/// Settings and exercise drafts hold their comma-joined text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Water {
        index: usize,
        amount: String,
    },
    WaterSettings {
        text: String,
    },
    Meal {
        index: usize,
        food: String,
        time: String,
        photo: Option<PhotoPayload>,
    },
    MealSettings {
        text: String,
    },
    Weight {
        text: String,
    },
    Exercise {
        text: String,
    },
}

impl Draft {
    /// Seed a draft for `target` from `day`. Missing slots seed empty values.
    pub fn seed(day: &RecordDay, target: EditTarget) -> Self {
        match target {
            EditTarget::Water(index) => Draft::Water {
                index,
                amount: day
                    .water
                    .slot(index)
                    .map(|slot| slot.amount().to_string())
                    .unwrap_or_default(),
            },
            EditTarget::WaterSettings => Draft::WaterSettings {
                text: WaterSettings {
                    count: day.water.count(),
                    target_amount: day.water.target_amount(),
                }
                .to_string(),
            },
            EditTarget::Meal(index) => {
                let slot = day.meals.slot(index).cloned().unwrap_or_default();
                Draft::Meal {
                    index,
                    food: slot.food,
                    time: slot.time,
                    photo: slot.photo,
                }
            }
            EditTarget::MealSettings => Draft::MealSettings {
                text: MealSettings {
                    count: day.meals.count(),
                    labels: day.meals.labels().to_vec(),
                }
                .to_string(),
            },
            EditTarget::Weight => Draft::Weight {
                text: day.weight.clone(),
            },
            EditTarget::Exercise => Draft::Exercise {
                text: ExerciseEntry {
                    kind: day.exercise.kind.clone(),
                    duration: day.exercise.duration.clone(),
                }
                .to_string(),
            },
        }
    }

    pub fn target(&self) -> EditTarget {
        match self {
            Draft::Water { index, .. } => EditTarget::Water(*index),
            Draft::WaterSettings { .. } => EditTarget::WaterSettings,
            Draft::Meal { index, .. } => EditTarget::Meal(*index),
            Draft::MealSettings { .. } => EditTarget::MealSettings,
            Draft::Weight { .. } => EditTarget::Weight,
            Draft::Exercise { .. } => EditTarget::Exercise,
        }
    }

    /// The draft's main text field.
    pub fn text(&self) -> &str {
        match self {
            Draft::Water { amount, .. } => amount,
            Draft::Meal { food, .. } => food,
            Draft::WaterSettings { text }
            | Draft::MealSettings { text }
            | Draft::Weight { text }
            | Draft::Exercise { text } => text,
        }
    }

    fn apply(&mut self, delta: FieldDelta) -> Result<(), SessionError> {
        let target = self.target();
        match (self, delta) {
            (Draft::Water { amount, .. }, FieldDelta::Text(value)) => *amount = value,
            (Draft::Meal { food, .. }, FieldDelta::Text(value)) => *food = value,
            (
                Draft::WaterSettings { text }
                | Draft::MealSettings { text }
                | Draft::Weight { text }
                | Draft::Exercise { text },
                FieldDelta::Text(value),
            ) => *text = value,

            (Draft::Meal { time, .. }, FieldDelta::Time(value)) => *time = value,
            (Draft::Meal { photo, .. }, FieldDelta::Photo(value)) => *photo = value,

            (Draft::WaterSettings { text }, FieldDelta::Count(count)) => {
                *text = WaterSettings::with_count_text(text, &count)
            }
            (Draft::WaterSettings { text }, FieldDelta::Target(target)) => {
                *text = WaterSettings::with_target_text(text, &target)
            }
            (Draft::MealSettings { text }, FieldDelta::Count(count)) => {
                *text = MealSettings::with_count_text(&count)
            }
            (Draft::MealSettings { text }, FieldDelta::Labels(labels)) => {
                *text = MealSettings::with_labels_text(text, &labels)
            }

            (_, delta) => {
                return Err(SessionError::InapplicableField {
                    field: delta.name(),
                    target,
                })
            }
        }
        Ok(())
    }
}

/// A change to one field of the open draft. Values are not validated until
/// commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDelta {
    /// Main text: amount, food, weight, exercise or whole settings text
    Text(String),
    /// Meal time
    Time(String),
    /// Meal photo; `None` removes it
    Photo(Option<PhotoPayload>),
    /// Slot count in water or meal settings. For meals this also resets the
    /// labels from the preset list.
    Count(String),
    /// Daily target in water settings
    Target(String),
    /// Comma-separated labels in meal settings
    Labels(String),
}

impl FieldDelta {
    fn name(&self) -> &'static str {
        match self {
            FieldDelta::Text(_) => "text",
            FieldDelta::Time(_) => "time",
            FieldDelta::Photo(_) => "photo",
            FieldDelta::Count(_) => "count",
            FieldDelta::Target(_) => "target",
            FieldDelta::Labels(_) => "labels",
        }
    }
}

/// Result of a successful commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Committed {
    pub date: DateKey,
    pub target: EditTarget,
    /// False when the target slot no longer exists and the store was left
    /// unchanged
    pub applied: bool,
}

/// The edit workflow: `Closed` or `Open` with one draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    Open { date: DateKey, draft: Draft },
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditSession::Open { draft, .. } => Some(draft),
            EditSession::Closed => None,
        }
    }

    pub fn date(&self) -> Option<DateKey> {
        match self {
            EditSession::Open { date, .. } => Some(*date),
            EditSession::Closed => None,
        }
    }

    /// Open a draft of `target` on `date`, seeded from the stored day (or
    /// from a fresh day if `date` was never touched). Replaces any open
    /// draft. Never fails and never writes to the store.
    pub fn open(&mut self, store: &RecordStore, date: DateKey, target: EditTarget) -> &Draft {
        let draft = match store.peek(date) {
            Some(day) => Draft::seed(day, target),
            None => Draft::seed(&RecordDay::default(), target),
        };
        if self.is_open() {
            tracing::debug!("Replacing open edit with {} on {}", target, date);
        }

        *self = EditSession::Open { date, draft };
        match self {
            EditSession::Open { draft, .. } => &*draft,
            EditSession::Closed => unreachable!("session was just opened"),
        }
    }

    /// Change one field of the open draft.
    pub fn edit(&mut self, delta: FieldDelta) -> Result<&Draft, SessionError> {
        match self {
            EditSession::Open { draft, .. } => {
                draft.apply(delta)?;
                Ok(&*draft)
            }
            EditSession::Closed => Err(SessionError::NotOpen),
        }
    }

    /// Write the draft to the store through its tracker and close the
    /// session. Malformed numbers in settings text fall back to defaults.
    pub fn commit(&mut self, store: &mut RecordStore) -> Result<Committed, SessionError> {
        let (date, draft) = match std::mem::take(self) {
            EditSession::Open { date, draft } => (date, draft),
            EditSession::Closed => return Err(SessionError::NotOpen),
        };
        let target = draft.target();

        let applied = match draft {
            Draft::Water { index, amount } => {
                WaterTracker::new(store).set_amount(date, index, amount)
            }
            Draft::WaterSettings { text } => {
                let settings = WaterSettings::parse(&text);
                WaterTracker::new(store).configure(date, settings.count, settings.target_amount);
                true
            }
            Draft::Meal {
                index,
                food,
                time,
                photo,
            } => MealTracker::new(store).set_entry(
                date,
                index,
                food,
                Some(time.as_str()),
                PhotoUpdate::from(photo),
            ),
            Draft::MealSettings { text } => {
                let settings = MealSettings::parse(&text);
                MealTracker::new(store).configure(date, settings.count, settings.labels.as_slice());
                true
            }
            Draft::Weight { text } => {
                WeightLog::new(store).set_weight(date, text);
                true
            }
            Draft::Exercise { text } => {
                let entry = ExerciseEntry::parse(&text);
                ExerciseLog::new(store).set_exercise(date, entry.kind, entry.duration);
                true
            }
        };

        tracing::info!("Committed {} edit for {} (applied: {})", target, date, applied);
        Ok(Committed {
            date,
            target,
            applied,
        })
    }

    /// Drop the draft. Returns whether a session was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        *self = EditSession::Closed;
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn key() -> DateKey {
        DateKey::parse("2024-03-05").unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_open_seeds_defaults_for_untouched_day() {
        let store = RecordStore::new();
        let mut session = EditSession::new();

        let draft = session.open(&store, key(), EditTarget::WaterSettings).clone();
        assert_eq!(draft.text(), "8,2000");

        let draft = session.open(&store, key(), EditTarget::MealSettings).clone();
        assert_eq!(draft.text(), "4,아침,점심,간식,저녁");

        let draft = session.open(&store, key(), EditTarget::Exercise).clone();
        assert_eq!(draft.text(), "");

        // Opening never creates the day
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_seeds_from_meal_slot() {
        let mut store = RecordStore::new();
        let photo = PhotoPayload::new("data:image/png;base64,AA==");
        MealTracker::new(&mut store).set_entry(
            key(),
            1,
            "Noodles",
            Some("12:10"),
            PhotoUpdate::Set(photo.clone()),
        );

        let mut session = EditSession::new();
        let draft = session.open(&store, key(), EditTarget::Meal(1));
        assert_eq!(
            *draft,
            Draft::Meal {
                index: 1,
                food: "Noodles".to_string(),
                time: "12:10".to_string(),
                photo: Some(photo),
            }
        );
    }

    #[test]
    fn test_open_out_of_range_seeds_empty() {
        let store = RecordStore::new();
        let mut session = EditSession::new();

        let draft = session.open(&store, key(), EditTarget::Water(42));
        assert_eq!(draft.text(), "");
    }

    #[test]
    fn test_cancel_leaves_store_untouched() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::Weight);
        session.edit(FieldDelta::Text("70.1".to_string())).unwrap();
        assert!(session.cancel());

        assert!(!session.is_open());
        assert_eq!(store.revision(), 0);
        assert!(!store.get(key()).has_weight());
        assert!(!session.cancel());
    }

    #[test]
    fn test_commit_water_amount() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::Water(2));
        session.edit(FieldDelta::Text("500ml".to_string())).unwrap();
        let committed = session.commit(&mut store).unwrap();

        assert_eq!(committed.target, EditTarget::Water(2));
        assert!(committed.applied);
        assert_eq!(session, EditSession::Closed);
        assert_eq!(store.get(key()).water.slot(2).unwrap().amount(), "500ml");
    }

    #[test]
    fn test_commit_keeps_water_completion() {
        let mut store = RecordStore::new();
        let mut water = WaterTracker::new(&mut store);
        water.set_amount(key(), 0, "200ml");
        water.toggle_complete(key(), 0, &clock());

        let mut session = EditSession::new();
        session.open(&store, key(), EditTarget::Water(0));
        session.edit(FieldDelta::Text("250ml".to_string())).unwrap();
        session.commit(&mut store).unwrap();

        let slot = store.get(key()).water.slot(0).unwrap();
        assert_eq!(slot.amount(), "250ml");
        assert!(slot.completed());
        assert_eq!(slot.time(), "09:30");
    }

    #[test]
    fn test_commit_water_settings_with_field_edits() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::WaterSettings);
        session.edit(FieldDelta::Count("3".to_string())).unwrap();
        session.edit(FieldDelta::Target("900".to_string())).unwrap();
        assert_eq!(session.draft().unwrap().text(), "3,900");
        session.commit(&mut store).unwrap();

        let water = &store.get(key()).water;
        assert_eq!(water.count(), 3);
        assert_eq!(water.records().len(), 3);
        assert_eq!(water.target_amount(), 900);
    }

    #[test]
    fn test_commit_malformed_settings_fall_back() {
        let mut store = RecordStore::new();
        WaterTracker::new(&mut store).configure(key(), 3, 900);

        let mut session = EditSession::new();
        session.open(&store, key(), EditTarget::WaterSettings);
        session.edit(FieldDelta::Text("lots".to_string())).unwrap();
        session.commit(&mut store).unwrap();

        let water = &store.get(key()).water;
        assert_eq!(water.count(), 8);
        assert_eq!(water.target_amount(), 2000);
    }

    #[test]
    fn test_commit_oversized_count_falls_back() {
        let mut store = RecordStore::new();

        let mut session = EditSession::new();
        session.open(&store, key(), EditTarget::WaterSettings);
        session
            .edit(FieldDelta::Text("99999999999999,2000".to_string()))
            .unwrap();
        session.commit(&mut store).unwrap();

        session.open(&store, key(), EditTarget::MealSettings);
        session
            .edit(FieldDelta::Count("99999999999999".to_string()))
            .unwrap();
        session.commit(&mut store).unwrap();

        let day = store.get(key());
        assert_eq!(day.water.count(), 8);
        assert_eq!(day.water.records().len(), 8);
        assert_eq!(day.meals.count(), 4);
    }

    #[test]
    fn test_commit_meal_settings() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::MealSettings);
        session
            .edit(FieldDelta::Text("2,Breakfast,Dinner".to_string()))
            .unwrap();
        session.commit(&mut store).unwrap();

        let meals = &store.get(key()).meals;
        assert_eq!(meals.count(), 2);
        assert_eq!(meals.labels(), &["Breakfast", "Dinner"]);
    }

    #[test]
    fn test_meal_count_edit_resets_labels() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::MealSettings);
        session.edit(FieldDelta::Count("5".to_string())).unwrap();
        assert_eq!(session.draft().unwrap().text(), "5,아침,점심,간식,저녁,야식");
        session.edit(FieldDelta::Labels("A,B".to_string())).unwrap();
        session.commit(&mut store).unwrap();

        let meals = &store.get(key()).meals;
        assert_eq!(meals.labels(), &["A", "B", "3번째", "4번째", "5번째"]);
    }

    #[test]
    fn test_commit_meal_keeps_time_when_blank() {
        let mut store = RecordStore::new();
        MealTracker::new(&mut store).set_entry(key(), 0, "Eggs", Some("08:00"), PhotoUpdate::Keep);

        let mut session = EditSession::new();
        session.open(&store, key(), EditTarget::Meal(0));
        session.edit(FieldDelta::Time(String::new())).unwrap();
        session.edit(FieldDelta::Text("Omelette".to_string())).unwrap();
        session.commit(&mut store).unwrap();

        let slot = store.get(key()).meals.slot(0).unwrap();
        assert_eq!(slot.food, "Omelette");
        assert_eq!(slot.time, "08:00");
    }

    #[test]
    fn test_commit_meal_photo_clear() {
        let mut store = RecordStore::new();
        MealTracker::new(&mut store).set_photo(key(), 0, Some(PhotoPayload::new("data:x")));

        let mut session = EditSession::new();
        session.open(&store, key(), EditTarget::Meal(0));
        session.edit(FieldDelta::Photo(None)).unwrap();
        session.commit(&mut store).unwrap();

        assert_eq!(store.get(key()).meals.slot(0).unwrap().photo, None);
    }

    #[test]
    fn test_commit_exercise_and_weight() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::Exercise);
        session.edit(FieldDelta::Text("런닝, 30분".to_string())).unwrap();
        session.commit(&mut store).unwrap();

        session.open(&store, key(), EditTarget::Weight);
        session.edit(FieldDelta::Text("70.4".to_string())).unwrap();
        session.commit(&mut store).unwrap();

        let day = store.get(key());
        assert_eq!(day.exercise.kind, "런닝");
        assert_eq!(day.exercise.duration, "30분");
        assert!(day.exercise.completed);
        assert_eq!(day.weight, "70.4");

        // Re-opening seeds the recorded exercise
        assert_eq!(
            session.open(&store, key(), EditTarget::Exercise).text(),
            "런닝,30분"
        );
    }

    #[test]
    fn test_commit_out_of_range_not_applied() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::Meal(9));
        session.edit(FieldDelta::Text("Cake".to_string())).unwrap();
        let committed = session.commit(&mut store).unwrap();

        assert!(!committed.applied);
        assert!(!session.is_open());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_open_replaces_previous_draft() {
        let store = RecordStore::new();
        let mut session = EditSession::new();

        session.open(&store, key(), EditTarget::Weight);
        session.edit(FieldDelta::Text("80".to_string())).unwrap();
        session.open(&store, key(), EditTarget::Water(0));

        assert_eq!(session.draft().unwrap().target(), EditTarget::Water(0));
        assert_eq!(session.draft().unwrap().text(), "");
    }

    #[test]
    fn test_closed_session_errors() {
        let mut store = RecordStore::new();
        let mut session = EditSession::new();

        assert_eq!(
            session.edit(FieldDelta::Text("x".to_string())).unwrap_err(),
            SessionError::NotOpen
        );
        assert_eq!(session.commit(&mut store).unwrap_err(), SessionError::NotOpen);
    }

    #[test]
    fn test_inapplicable_field() {
        let store = RecordStore::new();
        let mut session = EditSession::new();
        session.open(&store, key(), EditTarget::Weight);

        let err = session
            .edit(FieldDelta::Photo(Some(PhotoPayload::new("data:x"))))
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot set photo while editing weight");
        // Draft survives the rejected edit
        assert!(session.is_open());
    }
}
