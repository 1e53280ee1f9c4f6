//! Normalize raw busy intervals into a minimal sorted set.
//!
//! Sorts a copy of the input by start time, then folds each interval into the
//! last accumulated one whenever they overlap or touch. The result satisfies
//! `a.end < b.start` for every consecutive pair.

use tracing::debug;

use crate::error::Result;
use crate::interval::{Instant, Interval};

/// Merge overlapping or touching busy intervals.
///
/// The input may be in any order and may mix intervals from several
/// calendars. Empty (`start == end`) and inverted (`start > end`) intervals
/// cover no time and are dropped; use [`validate`] first to reject them
/// instead. The input slice is not modified.
pub fn merge<T: Instant>(raw: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut intervals: Vec<Interval<T>> =
        raw.iter().filter(|iv| !iv.is_empty()).copied().collect();

    let dropped = raw.len() - intervals.len();
    if dropped > 0 {
        debug!(dropped, "ignoring empty or inverted busy intervals");
    }

    if intervals.is_empty() {
        return Vec::new();
    }

    // Ties on start are broken by end so the output does not depend on input order.
    intervals.sort_unstable_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval<T>> = Vec::with_capacity(intervals.len());
    for cur in intervals {
        if let Some(last) = merged.last_mut() {
            // `<=` so touching intervals merge and no zero-width gap survives.
            if cur.start <= last.end {
                last.end = last.end.max(cur.end);
                continue;
            }
        }
        merged.push(cur);
    }

    merged
}

/// Reject any inverted interval in `raw`.
///
/// Zero-length intervals pass; they are harmless to [`merge`].
pub fn validate<T: Instant>(raw: &[Interval<T>]) -> Result<()> {
    raw.iter()
        .try_for_each(|iv| Interval::try_new(iv.start, iv.end).map(drop))
}

/// Check the merged-set invariant: sorted, non-empty members, strict gaps.
pub fn is_normalized<T: Instant>(intervals: &[Interval<T>]) -> bool {
    intervals.iter().all(|iv| !iv.is_empty())
        && intervals.windows(2).all(|pair| pair[0].end < pair[1].start)
}
