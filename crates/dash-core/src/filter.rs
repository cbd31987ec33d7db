//! Days filter — prefix truncation of the day sequence.

use crate::snapshot::Day;

/// Keep the first `filter` days when the preference is a positive integer
/// strictly below the day count; otherwise the sequence is unchanged. This
/// trusts the snapshot's most-recent-first ordering — it is not a date-range
/// filter.
pub fn apply_days_filter(days: &[Day], filter: Option<usize>) -> &[Day] {
    match filter {
        Some(n) if n > 0 && n < days.len() => &days[..n],
        _ => days,
    }
}
