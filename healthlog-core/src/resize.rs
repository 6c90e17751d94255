//! Growing and shrinking fixed-position slot arrays.
//!
//! Slots are addressed by index from the UI, so a resize keeps every slot
//! that still has a position and only fills new positions with fresh
//! defaults. Each new slot comes from its own factory call; no two
//! positions share a value.

/// Resize `existing` to exactly `new_count` slots.
///
/// `result[i] == existing[i]` for every `i < min(existing.len(), new_count)`;
/// the remaining positions are filled by calling `make_default` once each.
/// `existing` is left untouched.
pub fn resize<T: Clone>(
    existing: &[T],
    new_count: usize,
    mut make_default: impl FnMut() -> T,
) -> Vec<T> {
    (0..new_count)
        .map(|i| match existing.get(i) {
            Some(slot) => slot.clone(),
            None => make_default(),
        })
        .collect()
}

/// Resize a label list to `new_count` entries.
///
/// Same truncate-or-pad rule as [`resize`], except that blank labels and
/// padded positions get the ordinal label for their position, so every slot
/// always has a label.
pub fn resize_labels<S: AsRef<str>>(labels: &[S], new_count: usize) -> Vec<String> {
    (0..new_count)
        .map(|i| {
            labels
                .get(i)
                .map(|label| label.as_ref().trim())
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| ordinal_label(i))
        })
        .collect()
}

/// Fallback label for the slot at `index` (`0` is `1번째`).
pub fn ordinal_label(index: usize) -> String {
    format!("{}번째", index + 1)
}
