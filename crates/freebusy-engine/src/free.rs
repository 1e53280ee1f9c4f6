//! Derive free slots from a merged busy set within a query window.
//!
//! A single left-to-right sweep: a cursor starts at the window start, every
//! busy interval that begins after the cursor opens a gap, and the cursor then
//! jumps past that interval. The sweep stops once the cursor reaches the
//! window end.

use crate::interval::{Instant, Interval};

/// Find the free slots inside `[query_start, query_end)`.
///
/// `merged_busy` must already be sorted and non-overlapping, as produced by
/// [`crate::merge::merge`]; it is not re-merged here. Busy intervals outside
/// the window are clipped away. Every returned slot lies inside the window and
/// is non-empty, and slots come back in ascending order.
///
/// An inverted or zero-length window yields no slots. An empty busy set
/// yields the whole window.
pub fn free_slots<T: Instant>(
    merged_busy: &[Interval<T>],
    query_start: T,
    query_end: T,
) -> Vec<Interval<T>> {
    if query_start >= query_end {
        return Vec::new();
    }

    let mut free = Vec::new();
    let mut cursor = query_start;

    for busy in merged_busy {
        if cursor < busy.start {
            let gap_end = busy.start.min(query_end);
            if gap_end > cursor {
                free.push(Interval::new(cursor, gap_end));
            }
        }
        cursor = cursor.max(busy.end);
        if cursor >= query_end {
            break;
        }
    }

    // Trailing free slot after the last busy period.
    if cursor < query_end {
        free.push(Interval::new(cursor, query_end));
    }

    free
}

/// [`free_slots`] with the window given as an interval.
pub fn free_slots_in<T: Instant>(
    merged_busy: &[Interval<T>],
    window: Interval<T>,
) -> Vec<Interval<T>> {
    free_slots(merged_busy, window.start, window.end)
}

/// Free slots lasting at least `min_span`.
pub fn free_slots_at_least<T: Instant>(
    merged_busy: &[Interval<T>],
    query_start: T,
    query_end: T,
    min_span: T::Span,
) -> Vec<Interval<T>> {
    free_slots(merged_busy, query_start, query_end)
        .into_iter()
        .filter(|slot| slot.duration() >= min_span)
        .collect()
}

/// The earliest free slot lasting at least `min_span`, if any.
pub fn first_free_slot<T: Instant>(
    merged_busy: &[Interval<T>],
    query_start: T,
    query_end: T,
    min_span: T::Span,
) -> Option<Interval<T>> {
    free_slots(merged_busy, query_start, query_end)
        .into_iter()
        .find(|slot| slot.duration() >= min_span)
}
