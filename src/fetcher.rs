//! Raw availability retrieval for one venue and date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::finder::SlotFinder;
use crate::model::wire::{ResourceAvailabilityRecord, SlotRecord};
use crate::model::{AvailabilitySet, Slot, UNKNOWN_COURT, Venue};
use crate::platform::{Transport, decode_json};
use crate::resolver::SPORT_ID;

impl<T: Transport> SlotFinder<T> {
    /// Fetch every open slot of `venue` on `date`.
    ///
    /// `utc_start`/`utc_end` are UTC clock times and are passed to the platform
    /// unchanged; absent bounds cover the whole day.
    #[instrument(level = "info", skip(self, venue), fields(venue = %venue.name()))]
    pub fn fetch(
        &self,
        venue: &Venue,
        date: NaiveDate,
        utc_start: Option<NaiveTime>,
        utc_end: Option<NaiveTime>,
    ) -> Result<AvailabilitySet> {
        let query = availability_query(venue.venue_id(), date, utc_start, utc_end);
        let body = self
            .transport
            .get(&self.endpoint("availability"), &query)
            .map_err(|e| e.context(format!("Failed to fetch availability for {}", venue.name())))?;
        let set = availability_from_json(venue, date, &body)?;

        info!(
            slots = set.len(),
            date = %date,
            window = %describe_window(utc_start, utc_end),
            "Fetched availability"
        );
        Ok(set)
    }
}

/// Query pairs for the availability endpoint.
pub fn availability_query(
    venue_id: &str,
    date: NaiveDate,
    utc_start: Option<NaiveTime>,
    utc_end: Option<NaiveTime>,
) -> Vec<(&'static str, String)> {
    let day = date.format("%Y-%m-%d").to_string();
    let start = utc_start.map_or_else(|| "00:00".to_string(), |t| t.format("%H:%M").to_string());
    let end = utc_end.map_or_else(|| "23:59".to_string(), |t| t.format("%H:%M").to_string());
    vec![
        ("tenant_id", venue_id.to_string()),
        ("date", day.clone()),
        ("sport_id", SPORT_ID.to_string()),
        ("start_min", format!("{}T{}:00", day, start)),
        ("start_max", format!("{}T{}:59", day, end)),
    ]
}

/// Flatten an availability response into slots.
///
/// Court blocks keep the order the platform sent them in. A malformed slot
/// entry or a block without a court id is logged and skipped.
pub fn availability_from_json(venue: &Venue, date: NaiveDate, body: &str) -> Result<AvailabilitySet> {
    let blocks: Vec<ResourceAvailabilityRecord> = decode_json(body, "availability")?;
    let mut set = AvailabilitySet::empty(venue.venue_id(), date);

    for block in blocks {
        let Some(court_id) = block.resource_id else {
            warn!(entries = block.slots.len(), "Skipping availability block without resource_id");
            continue;
        };
        let court_name = venue
            .court_by_id(&court_id)
            .map_or(UNKNOWN_COURT, |c| c.name())
            .to_string();

        for raw in block.slots {
            match parse_slot(raw, date) {
                Ok((start_time, record)) => set.slots.push(Slot {
                    venue_id: venue.venue_id().to_string(),
                    court_id: court_id.clone(),
                    court_name: court_name.clone(),
                    start_time,
                    duration_minutes: record.duration,
                    price: record.price,
                }),
                Err(reason) => {
                    warn!(court_id = %court_id, reason = %reason, "Skipping invalid slot data");
                }
            }
        }
    }
    Ok(set)
}

fn parse_slot(raw: serde_json::Value, date: NaiveDate) -> std::result::Result<(DateTime<Utc>, SlotRecord), String> {
    let record: SlotRecord = serde_json::from_value(raw).map_err(|e| e.to_string())?;
    let time = NaiveTime::parse_from_str(record.start_time.trim(), "%H:%M:%S")
        .map_err(|e| format!("start_time '{}': {}", record.start_time, e))?;
    let start = NaiveDateTime::new(date, time).and_utc();
    Ok((start, record))
}

fn describe_window(utc_start: Option<NaiveTime>, utc_end: Option<NaiveTime>) -> String {
    match (utc_start, utc_end) {
        (Some(s), Some(e)) => format!("between {} and {} (UTC)", s.format("%H:%M"), e.format("%H:%M")),
        (Some(s), None) => format!("from {} (UTC) onwards", s.format("%H:%M")),
        (None, Some(e)) => format!("until {} (UTC)", e.format("%H:%M")),
        (None, None) => "all day".to_string(),
    }
}
