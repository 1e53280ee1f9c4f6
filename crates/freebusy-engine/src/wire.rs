//! Conversion between provider JSON documents and engine intervals.
//!
//! Input is either a Google Calendar `freeBusy.query` response or a bare array
//! of `{start, end}` objects. Output DTOs carry RFC 3339 strings in UTC so the
//! JSON can be handed straight back to a web client.
//!
//! Nothing here touches the network; callers fetch the documents themselves.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::availability::{Availability, BusySource};
use crate::error::{EngineError, Result};
use crate::interval::Interval;

/// Calendar id given to the single source built from a bare interval array.
pub const BARE_SOURCE_ID: &str = "input";

/// An interval of UTC timestamps, the shape every provider document parses into.
pub type UtcInterval = Interval<DateTime<Utc>>;

// ---------------------------------------------------------------------------
// Provider input
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyResponse {
    #[serde(default)]
    time_min: Option<String>,
    #[serde(default)]
    time_max: Option<String>,
    #[serde(default)]
    calendars: BTreeMap<String, CalendarBusy>,
}

#[derive(Deserialize)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<TimePeriod>,
    #[serde(default)]
    errors: Vec<ProviderError>,
}

#[derive(Deserialize)]
struct TimePeriod {
    start: String,
    end: String,
}

/// An error the provider reported for one calendar (e.g. `notFound`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderError {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub reason: String,
}

/// A parsed free/busy document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFreeBusy {
    /// The queried window start, when the document carries one.
    pub time_min: Option<DateTime<Utc>>,
    pub time_max: Option<DateTime<Utc>>,
    /// One source per calendar, ordered by calendar id.
    pub sources: Vec<BusySource<DateTime<Utc>>>,
    /// Calendars the provider could not answer for.
    pub failed_calendars: Vec<String>,
}

impl ProviderFreeBusy {
    /// The query window, preferring explicit overrides over the document's own bounds.
    pub fn window(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<UtcInterval> {
        resolve_window(start.or(self.time_min), end.or(self.time_max))
    }
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with any offset, and naive `YYYY-MM-DDTHH:MM:SS` which is
/// read as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| EngineError::InvalidTimestamp(format!("'{}': {}", s, e)))
}

/// Turn an optional pair of bounds into a window, failing if either is missing.
///
/// An inverted window is returned as-is; the extractor treats it as empty.
pub fn resolve_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<UtcInterval> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Interval::new(start, end)),
        (None, _) => Err(EngineError::InvalidWindow("missing window start".into())),
        (_, None) => Err(EngineError::InvalidWindow("missing window end".into())),
    }
}

fn parse_periods(periods: &[TimePeriod]) -> Result<Vec<UtcInterval>> {
    periods
        .iter()
        .map(|p| Interval::try_new(parse_timestamp(&p.start)?, parse_timestamp(&p.end)?))
        .collect()
}

/// Parse a Google Calendar `freeBusy.query` response body.
///
/// Calendars that report errors stay in `sources` with whatever busy periods
/// they carry and are also listed in `failed_calendars`. Inverted periods are
/// rejected.
pub fn parse_freebusy_response(json: &str) -> Result<ProviderFreeBusy> {
    let response: FreeBusyResponse = serde_json::from_str(json)?;
    from_response(response)
}

fn from_response(response: FreeBusyResponse) -> Result<ProviderFreeBusy> {
    let time_min = response
        .time_min
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;
    let time_max = response
        .time_max
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;

    let mut sources = Vec::with_capacity(response.calendars.len());
    let mut failed_calendars = Vec::new();

    for (calendar_id, calendar) in response.calendars {
        if !calendar.errors.is_empty() {
            let reasons: Vec<&str> =
                calendar.errors.iter().map(|e| e.reason.as_str()).collect();
            warn!(calendar = %calendar_id, ?reasons, "provider reported errors for calendar");
            failed_calendars.push(calendar_id.clone());
        }
        let busy = parse_periods(&calendar.busy)?;
        sources.push(BusySource::new(calendar_id, busy));
    }

    Ok(ProviderFreeBusy {
        time_min,
        time_max,
        sources,
        failed_calendars,
    })
}

/// Parse a bare JSON array of `{start, end}` objects.
pub fn parse_intervals_json(json: &str) -> Result<Vec<UtcInterval>> {
    let periods: Vec<TimePeriod> = serde_json::from_str(json)?;
    parse_periods(&periods)
}

/// Parse either document shape: a JSON array becomes a single source named
/// [`BARE_SOURCE_ID`] with no window, an object is read as a provider response.
pub fn parse_busy_document(json: &str) -> Result<ProviderFreeBusy> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_array() {
        let periods: Vec<TimePeriod> = serde_json::from_value(value)?;
        let busy = parse_periods(&periods)?;
        return Ok(ProviderFreeBusy {
            time_min: None,
            time_max: None,
            sources: vec![BusySource::new(BARE_SOURCE_ID, busy)],
            failed_calendars: Vec::new(),
        });
    }
    from_response(serde_json::from_value(value)?)
}

// ---------------------------------------------------------------------------
// Output DTOs
// ---------------------------------------------------------------------------

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyBlockDto {
    pub start: String,
    pub end: String,
}

impl From<&UtcInterval> for BusyBlockDto {
    fn from(iv: &UtcInterval) -> Self {
        Self {
            start: format_timestamp(iv.start),
            end: format_timestamp(iv.end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlotDto {
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
}

impl From<&UtcInterval> for FreeSlotDto {
    fn from(iv: &UtcInterval) -> Self {
        Self {
            start: format_timestamp(iv.start),
            end: format_timestamp(iv.end),
            duration_minutes: iv.duration().num_minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDto {
    pub time_min: String,
    pub time_max: String,
    pub busy: Vec<BusyBlockDto>,
    pub free: Vec<FreeSlotDto>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failed_calendars: Vec<String>,
}

impl AvailabilityDto {
    pub fn new(
        availability: &Availability<DateTime<Utc>>,
        failed_calendars: Vec<String>,
    ) -> Self {
        Self {
            time_min: format_timestamp(availability.window.start),
            time_max: format_timestamp(availability.window.end),
            busy: availability.busy.iter().map(BusyBlockDto::from).collect(),
            free: availability.free.iter().map(FreeSlotDto::from).collect(),
            failed_calendars,
        }
    }
}

pub fn busy_blocks(intervals: &[UtcInterval]) -> Vec<BusyBlockDto> {
    intervals.iter().map(BusyBlockDto::from).collect()
}

pub fn free_slot_dtos(slots: &[UtcInterval]) -> Vec<FreeSlotDto> {
    slots.iter().map(FreeSlotDto::from).collect()
}

/// Serialize merged busy blocks as a compact JSON array.
pub fn render_busy(intervals: &[UtcInterval]) -> Result<String> {
    Ok(serde_json::to_string(&busy_blocks(intervals))?)
}

/// Serialize free slots as a compact JSON array.
pub fn render_free_slots(slots: &[UtcInterval]) -> Result<String> {
    Ok(serde_json::to_string(&free_slot_dtos(slots))?)
}

/// Serialize an availability view as a compact JSON object.
pub fn render_availability(
    availability: &Availability<DateTime<Utc>>,
    failed_calendars: Vec<String>,
) -> Result<String> {
    Ok(serde_json::to_string(&AvailabilityDto::new(
        availability,
        failed_calendars,
    ))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamp_is_utc() {
        let dt = parse_timestamp("2026-03-01T09:00:00").unwrap();
        assert_eq!(format_timestamp(dt), "2026-03-01T09:00:00Z");
    }

    #[test]
    fn offset_timestamp_normalized_to_utc() {
        let dt = parse_timestamp("2026-03-01T09:00:00-05:00").unwrap();
        assert_eq!(format_timestamp(dt), "2026-03-01T14:00:00Z");
    }

    #[test]
    fn garbage_timestamp_rejected() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimestamp(_)));
    }

    #[test]
    fn window_requires_both_bounds() {
        let t = parse_timestamp("2026-03-01T09:00:00Z").unwrap();
        assert!(resolve_window(Some(t), None).is_err());
        assert!(resolve_window(None, Some(t)).is_err());
        assert!(resolve_window(Some(t), Some(t)).is_ok());
    }
}
