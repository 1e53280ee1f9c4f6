//! The interval value type shared by the merge and extraction passes.
//!
//! Intervals are half-open `[start, end)` ranges over any totally ordered
//! instant type. Two instant types are supported out of the box: `i64` epoch
//! milliseconds and `chrono::DateTime<Utc>`.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A point in absolute time that intervals can be built from.
pub trait Instant: Copy + Ord + fmt::Debug {
    /// The length of time between two instants.
    type Span: Copy + Ord + fmt::Debug;

    /// Span from `self` to `later`. Negative when `later` precedes `self`.
    fn until(self, later: Self) -> Self::Span;
}

impl Instant for i64 {
    type Span = i64;

    fn until(self, later: Self) -> i64 {
        later.saturating_sub(self)
    }
}

impl Instant for DateTime<Utc> {
    type Span = TimeDelta;

    fn until(self, later: Self) -> TimeDelta {
        later.signed_duration_since(self)
    }
}

/// A half-open time range `[start, end)`.
///
/// The type carries no identity beyond its bounds. `start <= end` is expected
/// but only enforced by [`Interval::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval<T = i64> {
    pub start: T,
    pub end: T,
}

impl<T: Instant> Interval<T> {
    /// Build an interval without checking the bounds.
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Build an interval, rejecting `start > end`. Zero-length is accepted.
    pub fn try_new(start: T, end: T) -> Result<Self> {
        if start > end {
            return Err(EngineError::InvertedInterval {
                start: format!("{:?}", start),
                end: format!("{:?}", end),
            });
        }
        Ok(Self { start, end })
    }

    /// True when the interval covers no time (zero-length or inverted).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn duration(&self) -> T::Span {
        self.start.until(self.end)
    }

    /// Strict overlap: intervals that only touch do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The merge predicate: overlapping or sharing an endpoint.
    pub fn touches_or_overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains_instant(&self, t: T) -> bool {
        self.start <= t && t < self.end
    }

    /// The part of `self` inside `window`, or `None` if nothing non-empty remains.
    pub fn clip(&self, window: &Self) -> Option<Self> {
        let start = self.start.max(window.start);
        let end = self.end.min(window.end);
        (start < end).then_some(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_inverted() {
        assert!(Interval::try_new(20_i64, 10).is_err());
        assert!(Interval::try_new(10_i64, 10).is_ok());
    }

    #[test]
    fn touching_is_not_overlap_but_merges() {
        let a = Interval::new(10_i64, 20);
        let b = Interval::new(20_i64, 30);
        assert!(!a.overlaps(&b));
        assert!(a.touches_or_overlaps(&b));
        assert!(b.touches_or_overlaps(&a));
    }

    #[test]
    fn clip_drops_outside_and_trims_edges() {
        let window = Interval::new(0_i64, 50);
        assert_eq!(Interval::new(100_i64, 200).clip(&window), None);
        assert_eq!(Interval::new(50_i64, 60).clip(&window), None);
        assert_eq!(
            Interval::new(-10_i64, 10).clip(&window),
            Some(Interval::new(0, 10))
        );
    }

    #[test]
    fn half_open_containment() {
        let iv = Interval::new(10_i64, 20);
        assert!(iv.contains_instant(10));
        assert!(!iv.contains_instant(20));
    }

    #[test]
    fn datetime_duration_is_time_delta() {
        let start: DateTime<Utc> = "2026-03-01T09:00:00Z".parse().unwrap();
        let end: DateTime<Utc> = "2026-03-01T10:30:00Z".parse().unwrap();
        assert_eq!(Interval::new(start, end).duration(), TimeDelta::minutes(90));
    }
}
