//! Weight trend over every recorded day.

use serde::Serialize;

use crate::date_key::DateKey;
use crate::numeric::leading_float;
use crate::store::RecordStore;

/// One day's weight on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    pub date: DateKey,
    /// Axis label, e.g. `3월 5일`
    pub label: String,
    pub weight: f64,
}

/// Chronological weight series built from a store snapshot.
///
/// Iterating does not consume the series, so a chart can walk it as often
/// as it redraws.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightSeries {
    points: Vec<WeightPoint>,
}

impl WeightSeries {
    /// Collect the weight of every stored day that has one.
    ///
    /// Days whose weight text does not start with a finite number are left
    /// out rather than counted as zero. Points are ordered by date key.
    pub fn from_store(store: &RecordStore) -> Self {
        let mut points: Vec<WeightPoint> = store
            .all_entries()
            .filter(|(_, day)| day.has_weight())
            .filter_map(|(date, day)| match leading_float(&day.weight) {
                Some(weight) => Some(WeightPoint {
                    date,
                    label: date.short_label(),
                    weight,
                }),
                None => {
                    tracing::debug!("Skipping non-numeric weight '{}' on {}", day.weight, date);
                    None
                }
            })
            .collect();

        points.sort_by_key(|point| point.date);
        Self { points }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightPoint> {
        self.points.iter()
    }

    pub fn points(&self) -> &[WeightPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&WeightPoint> {
        self.points.first()
    }

    pub fn latest(&self) -> Option<&WeightPoint> {
        self.points.last()
    }

    /// Lightest recorded weight
    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.weight).reduce(f64::min)
    }

    /// Heaviest recorded weight
    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.weight).reduce(f64::max)
    }

    /// Latest minus first weight; `None` with fewer than two points.
    pub fn change(&self) -> Option<f64> {
        match (self.first(), self.latest()) {
            (Some(first), Some(latest)) if self.points.len() > 1 => {
                Some(latest.weight - first.weight)
            }
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a WeightSeries {
    type Item = &'a WeightPoint;
    type IntoIter = std::slice::Iter<'a, WeightPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Shorthand for [`WeightSeries::from_store`].
pub fn weight_series(store: &RecordStore) -> WeightSeries {
    WeightSeries::from_store(store)
}
