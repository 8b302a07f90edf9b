//! Presentation of slot lists for the console and for tool-call responses.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::filter::utc_to_local;
use crate::model::{Slot, VenueSummary};

/// Group slots by court name, keeping the order in which each court first appears.
pub fn group_by_court(slots: &[Slot]) -> Vec<(&str, Vec<&Slot>)> {
    let mut groups: Vec<(&str, Vec<&Slot>)> = Vec::new();
    for slot in slots {
        match groups.iter_mut().find(|(name, _)| *name == slot.court_name) {
            Some((_, members)) => members.push(slot),
            None => groups.push((slot.court_name.as_str(), vec![slot])),
        }
    }
    groups
}

/// Human-readable listing with times shown in `tz`.
pub fn render_console(slots: &[Slot], tz: Tz, link_base_url: &str) -> String {
    let mut out = String::new();
    for (court_name, court_slots) in group_by_court(slots) {
        out.push_str("\nCourt: ");
        out.push_str(court_name);
        out.push('\n');
        for slot in court_slots {
            out.push_str(&format!(
                "  Time: {} | Duration: {}min | Price: {} | Link: {}\n",
                utc_to_local(slot.start_time, tz).format("%H:%M"),
                slot.duration_minutes,
                slot.price,
                slot.booking_link(link_base_url)
            ));
        }
    }
    out
}

/// One slot as surfaced to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub local_time: String,
    pub court: String,
    pub duration: u32,
    pub price: String,
    pub booking_link: String,
}

/// Structured `find_slots` response.
///
/// `count` is the number of matching slots; `slots` holds at most the
/// configured cap, in match order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsPayload {
    pub count: usize,
    pub date: String,
    pub slots: Vec<SlotEntry>,
}

impl SlotsPayload {
    pub fn build(date: NaiveDate, slots: &[Slot], tz: Tz, link_base_url: &str, cap: usize) -> Self {
        let entries = slots
            .iter()
            .take(cap)
            .map(|s| SlotEntry {
                local_time: utc_to_local(s.start_time, tz).format("%H:%M").to_string(),
                court: s.court_name.clone(),
                duration: s.duration_minutes,
                price: s.price.clone(),
                booking_link: s.booking_link(link_base_url),
            })
            .collect();
        Self {
            count: slots.len(),
            date: date.format("%Y-%m-%d").to_string(),
            slots: entries,
        }
    }
}

/// Cap a venue search result for a tool response.
pub fn venue_payload(venues: Vec<VenueSummary>, cap: usize) -> Vec<VenueSummary> {
    venues.into_iter().take(cap).collect()
}

/// Console listing of venue search results.
pub fn render_venues(venues: &[VenueSummary]) -> String {
    if venues.is_empty() {
        return "No venues found.\n".to_string();
    }
    venues
        .iter()
        .map(|v| format!("{} | slug: {} | id: {} | timezone: {}\n", v.name, v.identifier, v.venue_id, v.timezone))
        .collect()
}
