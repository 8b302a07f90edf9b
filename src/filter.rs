//! Slot filtering and the end-to-end `find` orchestration.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SlotFinderError};
use crate::finder::SlotFinder;
use crate::model::{AvailabilitySet, CourtType, Slot, Venue, VenueSelector};
use crate::platform::Transport;

/// Narrow an availability set by court type and exact duration.
///
/// Slots on courts the venue does not list never match, whatever the type
/// filter. Input order is preserved.
pub fn filter_slots(
    venue: &Venue,
    availability: &AvailabilitySet,
    court_type: Option<CourtType>,
    duration: Option<u32>,
) -> Vec<Slot> {
    let target_ids = venue.court_ids(court_type);
    let filtered: Vec<Slot> = availability
        .slots
        .iter()
        .filter(|slot| target_ids.contains(slot.court_id.as_str()))
        .filter(|slot| duration.is_none_or(|d| slot.duration_minutes == d))
        .cloned()
        .collect();
    debug!(before = availability.len(), after = filtered.len(), "Filtered slots");
    filtered
}

/// Everything a caller can ask `find` for.
///
/// `local_start`/`local_end` are `HH:MM` wall-clock times in `timezone` on `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotQuery {
    pub venue_identifier: String,
    pub date: NaiveDate,
    pub court_type: Option<CourtType>,
    pub local_start: Option<String>,
    pub local_end: Option<String>,
    pub timezone: Option<String>,
    pub duration: Option<u32>,
}

/// UTC clock bounds handed to the fetcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtcWindow {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl SlotQuery {
    pub fn new(venue_identifier: impl Into<String>, date: NaiveDate) -> Self {
        Self { venue_identifier: venue_identifier.into(), date, ..Default::default() }
    }

    /// Convert the local window to UTC bounds, validating inputs.
    ///
    /// A window without a timezone is rejected rather than guessed. `None`
    /// means the window lies entirely outside the search date in UTC, so no
    /// slot can match.
    pub fn utc_window(&self) -> Result<Option<UtcWindow>> {
        if self.local_start.is_none() && self.local_end.is_none() {
            return Ok(Some(UtcWindow::default()));
        }
        let tz_name = self.timezone.as_deref().map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
            SlotFinderError::validation(
                "timezone is required when start_time or end_time is provided",
                "timezone",
            )
        })?;
        let tz = parse_timezone(tz_name)?;

        let start = self
            .local_start
            .as_deref()
            .map(|s| parse_clock(s, "start_time").map(|t| local_to_utc(self.date, t, tz)))
            .transpose()?;
        let end = self
            .local_end
            .as_deref()
            .map(|s| parse_clock(s, "end_time").map(|t| local_to_utc(self.date, t, tz)))
            .transpose()?;

        if start.is_some_and(|s| s.date_naive() > self.date) || end.is_some_and(|e| e.date_naive() < self.date) {
            return Ok(None);
        }
        Ok(Some(UtcWindow {
            start: start.map(|s| clamp_to_date(self.date, s)),
            end: end.map(|e| clamp_to_date(self.date, e)),
        }))
    }

    /// Active filters as key/value pairs, for logging and `SlotNotFound`.
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(t) = self.court_type {
            pairs.push(("court_type".to_string(), t.to_string()));
        }
        if let Some(s) = &self.local_start {
            pairs.push(("start_time".to_string(), s.clone()));
        }
        if let Some(e) = &self.local_end {
            pairs.push(("end_time".to_string(), e.clone()));
        }
        if let Some(tz) = &self.timezone {
            pairs.push(("timezone".to_string(), tz.clone()));
        }
        if let Some(d) = self.duration {
            pairs.push(("duration".to_string(), d.to_string()));
        }
        pairs
    }
}

impl<T: Transport> SlotFinder<T> {
    /// Resolve the venue, fetch availability scoped to the window, and filter.
    ///
    /// Inputs are validated before any request is made. No matches is an
    /// empty vector, not an error.
    #[instrument(level = "info", skip(self, query), fields(venue = %query.venue_identifier, date = %query.date))]
    pub fn find(&self, query: &SlotQuery) -> Result<Vec<Slot>> {
        let window = query.utc_window()?;
        let selector = VenueSelector::from_parts(Some(&query.venue_identifier), None)?;
        let Some(window) = window else {
            warn!("Time window falls outside the search date in UTC, no slots can match");
            return Ok(Vec::new());
        };

        let venue = self.resolve(&selector)?;
        let availability = self.fetch(&venue, query.date, window.start, window.end)?;
        let slots = filter_slots(&venue, &availability, query.court_type, query.duration);

        let filters = query
            .filter_pairs()
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        if slots.is_empty() {
            warn!(filters = %filters, "No slots found matching criteria");
        } else {
            info!(count = slots.len(), filters = %filters, "Found slots matching criteria");
        }
        Ok(slots)
    }

    /// Like [`SlotFinder::find`] but treats an empty result as [`SlotFinderError::SlotNotFound`].
    pub fn find_or_fail(&self, query: &SlotQuery) -> Result<Vec<Slot>> {
        let slots = self.find(query)?;
        if slots.is_empty() {
            return Err(SlotFinderError::SlotNotFound {
                venue_selector: query.venue_identifier.clone(),
                date: query.date.format("%Y-%m-%d").to_string(),
                filters: query.filter_pairs(),
            });
        }
        Ok(slots)
    }
}

/// Interpret a wall-clock time on `date` in `tz` and return the UTC instant.
///
/// A time inside a DST gap is read with the offset in force before the gap,
/// which moves it forward by the gap length. An ambiguous time takes the
/// earlier instant.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(naive - TimeDelta::days(1))).fix();
            (naive - TimeDelta::seconds(i64::from(before.local_minus_utc()))).and_utc()
        }
    }
}

/// Wall-clock time of a UTC instant in `tz`.
pub fn utc_to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveTime {
    instant.with_timezone(&tz).time()
}

/// UTC clock bound for the fetcher, clamped to the search date.
///
/// A local time whose UTC instant lands on the previous day becomes `00:00`,
/// one landing on the next day becomes `23:59`.
pub fn utc_bound(date: NaiveDate, local: NaiveTime, tz: Tz) -> NaiveTime {
    clamp_to_date(date, local_to_utc(date, local, tz))
}

fn clamp_to_date(date: NaiveDate, utc: DateTime<Utc>) -> NaiveTime {
    let utc_date = utc.date_naive();
    if utc_date < date {
        NaiveTime::MIN
    } else if utc_date > date {
        NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
    } else {
        let t = utc.time();
        t.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(t)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| SlotFinderError::validation(format!("Unknown timezone: {}", name), "timezone"))
}

/// Parse `HH:MM` (seconds tolerated).
pub fn parse_clock(raw: &str, field: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| SlotFinderError::validation(format!("Invalid {} '{}', expected HH:MM", field, raw), field))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| SlotFinderError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw), "date"))
}
