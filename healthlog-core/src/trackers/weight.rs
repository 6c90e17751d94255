use crate::date_key::DateKey;
use crate::store::RecordStore;

/// The day's fasting weight, kept as typed.
pub struct WeightLog<'a> {
    store: &'a mut RecordStore,
}

impl<'a> WeightLog<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Store the weight text unchanged. Whether it is a number is decided
    /// when the trend is built.
    pub fn set_weight(&mut self, key: DateKey, weight: impl Into<String>) {
        let weight = weight.into();
        self.store.put(key, |mut day| {
            day.weight = weight;
            day
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_weight_stores_raw_text() {
        let key = DateKey::parse("2024-03-05").unwrap();
        let mut store = RecordStore::new();
        let mut log = WeightLog::new(&mut store);

        log.set_weight(key, "70.5");
        log.set_weight(key, "heavy");

        assert_eq!(store.get(key).weight, "heavy");
    }

    #[test]
    fn test_clear_weight() {
        let key = DateKey::parse("2024-03-05").unwrap();
        let mut store = RecordStore::new();
        let mut log = WeightLog::new(&mut store);

        log.set_weight(key, "70.5");
        log.set_weight(key, "");

        assert!(!store.get(key).has_weight());
    }
}
