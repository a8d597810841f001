//! Choosing which snapshot period to process.

use chrono::NaiveDate;
use pbs_model::Period;

/// Picks the period to process from the available snapshots.
///
/// Prefers the month containing `today`, then the month before it, then the
/// latest available period. With a `lookback` window, that last fallback
/// ignores periods more than `lookback` months before today.
pub fn resolve_period(available: &[Period], today: NaiveDate, lookback: Option<u32>) -> Option<Period> {
    let current = Period::containing(today);
    if available.contains(&current) {
        return Some(current);
    }
    let previous = current.previous();
    if available.contains(&previous) {
        return Some(previous);
    }
    available
        .iter()
        .copied()
        .filter(|period| match lookback {
            Some(months) => current.months_since(*period) <= i64::from(months),
            None => true,
        })
        .max()
}
