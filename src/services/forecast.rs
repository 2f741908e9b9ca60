//! Derived forecast fields added to the provider's 3-hour series.

use serde_json::Value;

/// Entries per day in a 3-hour series
pub const ENTRIES_PER_DAY: usize = 8;

/// Number of raw entries exposed as `hourly` (about 72 hours)
pub const HOURLY_WINDOW: usize = 24;

/// Every 8th entry starting at the first, approximating one sample per day
///
/// Index based, not a calendar-day aggregation. The result has
/// `ceil(len / 8)` elements.
pub fn daily_subset<T: Clone>(series: &[T]) -> Vec<T> {
    series.iter().step_by(ENTRIES_PER_DAY).cloned().collect()
}

/// The first 24 raw entries. Named `hourly` on the wire although the
/// provider samples every three hours.
pub fn hourly_window<T: Clone>(series: &[T]) -> Vec<T> {
    series.iter().take(HOURLY_WINDOW).cloned().collect()
}

/// Add `daily` and `hourly` to a provider forecast payload
///
/// All other fields pass through unchanged. A payload without a `list`
/// array gets empty derived fields; a non-object payload is returned as is.
pub fn decorate_forecast(mut payload: Value) -> Value {
    let list = payload
        .get("list")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if let Some(object) = payload.as_object_mut() {
        object.insert("daily".to_string(), Value::Array(daily_subset(&list)));
        object.insert("hourly".to_string(), Value::Array(hourly_window(&list)));
    }

    payload
}
