use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::link;

/// Display name given to slots whose court is not listed on the venue.
pub const UNKNOWN_COURT: &str = "Unknown Court";

/// One bookable interval on one court.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub venue_id: String,
    pub court_id: String,
    // Denormalized at fetch time so rendering never needs the venue again.
    pub court_name: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub price: String,
}

impl Slot {
    /// Start time as `YYYY-MM-DDTHH:MM:SS.000Z`, the form the booking page expects.
    pub fn start_time_iso(&self) -> String {
        self.start_time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    pub fn booking_link(&self, link_base_url: &str) -> String {
        link::build_link(
            link_base_url,
            &self.venue_id,
            &self.court_id,
            &self.start_time_iso(),
            self.duration_minutes,
        )
    }
}

fn serialize_iso_millis<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

/// Unfiltered availability for one venue on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySet {
    pub venue_id: String,
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

impl AvailabilitySet {
    pub fn empty(venue_id: impl Into<String>, date: NaiveDate) -> Self {
        Self { venue_id: venue_id.into(), date, slots: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
