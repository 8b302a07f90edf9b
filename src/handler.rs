use std::sync::Arc;

use chrono::{Datelike, Weekday};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, instrument};

use crate::error::{Result, SlotFinderError};
use crate::filter::{SlotQuery, parse_date, parse_timezone};
use crate::finder::SlotFinder;
use crate::format::{SlotsPayload, venue_payload};
use crate::link;
use crate::model::CourtType;
use crate::platform::Transport;

/// A tool invocation from the agent, tagged by tool name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    FindSlots {
        club_slug: String,
        date: String,
        court_type: Option<CourtType>,
        start_time: Option<String>,
        end_time: Option<String>,
        timezone: Option<String>,
        duration: Option<u32>,
    },
    FindVenuesByName {
        name: String,
    },
    FindVenuesByLocation {
        query: String,
        country: Option<String>,
        radius_km: Option<u32>,
    },
    CreateBookingLink {
        club_id: String,
        court_id: String,
        /// UTC start, `YYYY-MM-DDTHH:MM:SS.000Z`.
        time: String,
        duration: u32,
    },
    IsWeekend {
        date: String,
    },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::FindSlots { .. } => "find_slots",
            ToolCall::FindVenuesByName { .. } => "find_venues_by_name",
            ToolCall::FindVenuesByLocation { .. } => "find_venues_by_location",
            ToolCall::CreateBookingLink { .. } => "create_booking_link",
            ToolCall::IsWeekend { .. } => "is_weekend",
        }
    }
}

/// Run one tool call and produce its JSON result.
///
/// Failures are returned as `{"error": {kind, message, details}}` so the agent
/// can read them and recover instead of the invocation failing.
pub fn dispatch<T: Transport>(finder: &SlotFinder<T>, call: ToolCall) -> Value {
    let tool = call.name();
    match run_tool(finder, call) {
        Ok(value) => value,
        Err(e) => {
            error!(tool, kind = e.kind(), error = %e, "Tool call failed");
            error_payload(&e)
        }
    }
}

/// Decode a raw tool-call event and run it.
///
/// An event that does not match any tool signature (unknown tool, wrong
/// argument type) comes back as a `validation_error` payload.
pub fn dispatch_event<T: Transport>(finder: &SlotFinder<T>, event: Value) -> Value {
    match serde_json::from_value::<ToolCall>(event) {
        Ok(call) => dispatch(finder, call),
        Err(e) => {
            let err = SlotFinderError::Validation {
                message: format!("Invalid tool call: {}", e),
                field: None,
            };
            error!(error = %err, "Rejected tool call");
            error_payload(&err)
        }
    }
}

pub fn error_payload(e: &SlotFinderError) -> Value {
    json!({
        "error": {
            "kind": e.kind(),
            "message": e.to_string(),
            "details": e.details(),
        }
    })
}

fn run_tool<T: Transport>(finder: &SlotFinder<T>, call: ToolCall) -> Result<Value> {
    let config = finder.config();
    match call {
        ToolCall::FindSlots { club_slug, date, court_type, start_time, end_time, timezone, duration } => {
            let date = parse_date(&date)?;
            let timezone = non_blank(timezone);
            // Display times need a zone even when the caller sends none.
            let tz = match timezone.as_deref() {
                Some(name) => parse_timezone(name)?,
                None => config.default_timezone,
            };
            let query = SlotQuery {
                venue_identifier: club_slug,
                date,
                court_type,
                local_start: non_blank(start_time),
                local_end: non_blank(end_time),
                timezone: Some(tz.name().to_string()),
                duration,
            };
            let slots = finder.find(&query)?;
            let payload = SlotsPayload::build(date, &slots, tz, &config.link_base_url, config.max_tool_slots);
            info!(count = payload.count, returned = payload.slots.len(), "Prepared find_slots payload");
            to_json(&payload)
        }
        ToolCall::FindVenuesByName { name } => {
            let venues = finder.search_by_name(&name)?;
            to_json(&venue_payload(venues, config.max_tool_venues))
        }
        ToolCall::FindVenuesByLocation { query, country, radius_km } => {
            let venues = finder.search_by_location(&query, non_blank(country).as_deref(), radius_km)?;
            to_json(&venue_payload(venues, config.max_tool_venues))
        }
        ToolCall::CreateBookingLink { club_id, court_id, time, duration } => {
            let url = link::build_link(&config.link_base_url, &club_id, &court_id, &time, duration);
            Ok(json!({ "booking_link": url }))
        }
        ToolCall::IsWeekend { date } => {
            let day = parse_date(&date)?;
            let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
            Ok(json!({ "date": date, "is_weekend": weekend }))
        }
    }
}

fn to_json<S: Serialize>(value: &S) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| SlotFinderError::parse(format!("Failed to encode tool response: {}", e)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Lambda entry: the finder is blocking, so the call runs on the blocking pool.
#[instrument(skip(finder, event), fields(tool = event.payload.get("tool").and_then(serde_json::Value::as_str).unwrap_or("unknown")))]
pub async fn handler<T>(finder: Arc<SlotFinder<T>>, event: LambdaEvent<Value>) -> std::result::Result<Value, Error>
where
    T: Transport + 'static,
{
    let payload = event.payload;
    let result = tokio::task::spawn_blocking(move || dispatch_event(&finder, payload)).await;
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            error!(error = %e, "Tool task join error");
            Err(e.into())
        }
    }
}
