//! Combine busy lists from several calendars into one availability view.
//!
//! Each calendar contributes a [`BusySource`]. Attribution is dropped before
//! merging: a block is busy if any calendar is busy, and every calendar counts
//! the same.

use serde::{Deserialize, Serialize};

use crate::free::free_slots_in;
use crate::interval::{Instant, Interval};
use crate::merge::merge;

/// Busy periods reported for a single calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusySource<T = i64> {
    /// Provider identifier for the calendar (e.g. "primary", an email address).
    pub calendar_id: String,
    pub busy: Vec<Interval<T>>,
}

impl<T: Instant> BusySource<T> {
    pub fn new(calendar_id: impl Into<String>, busy: Vec<Interval<T>>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            busy,
        }
    }
}

/// Busy and free time within one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability<T = i64> {
    pub window: Interval<T>,
    /// Merged busy blocks clipped to the window, sorted, strictly separated.
    pub busy: Vec<Interval<T>>,
    /// Free slots within the window, sorted.
    pub free: Vec<Interval<T>>,
}

/// Flatten the busy lists of every source and merge them.
pub fn merge_sources<T: Instant>(sources: &[BusySource<T>]) -> Vec<Interval<T>> {
    let all: Vec<Interval<T>> = sources
        .iter()
        .flat_map(|s| s.busy.iter().copied())
        .collect();
    merge(&all)
}

/// Compute busy blocks and free slots for `window` across all `sources`.
///
/// Busy blocks entirely outside the window are discarded and the rest are
/// clipped to it, so `busy` and `free` partition the window. A zero-length or
/// inverted window yields empty lists.
pub fn availability<T: Instant>(
    sources: &[BusySource<T>],
    window: Interval<T>,
) -> Availability<T> {
    if window.is_empty() {
        return Availability {
            window,
            busy: Vec::new(),
            free: Vec::new(),
        };
    }

    let merged = merge_sources(sources);
    let free = free_slots_in(&merged, window);

    // Clipping keeps the strict gaps: clipped blocks only shrink.
    let busy = merged.iter().filter_map(|b| b.clip(&window)).collect();

    Availability { window, busy, free }
}
