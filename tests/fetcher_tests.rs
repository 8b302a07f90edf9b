mod common;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use common::{AVAILABILITY, StubTransport, availability_lemon, availability_messy, finder};
use padel_slot_finder::model::{Court, CourtType, UNKNOWN_COURT, Venue};
use padel_slot_finder::SlotFinderError;

fn lemon_venue() -> Venue {
    Venue::new(
        "lemon-padel-club",
        "Lemon Padel Club",
        "lemon-123",
        chrono_tz::Europe::Berlin,
        vec![
            Court::new("court-1", "Court 1", CourtType::Double),
            Court::new("court-2", "Court 2", CourtType::Single),
        ],
    )
    .unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()
}

#[test]
fn flattens_court_blocks_in_arrival_order() {
    let f = finder(StubTransport::new().respond(AVAILABILITY, availability_lemon()));

    let set = f.fetch(&lemon_venue(), date(), None, None).unwrap();

    assert_eq!(set.venue_id, "lemon-123");
    assert_eq!(set.date, date());
    let summary: Vec<(&str, &str, u32)> = set
        .slots
        .iter()
        .map(|s| (s.court_id.as_str(), s.court_name.as_str(), s.duration_minutes))
        .collect();
    assert_eq!(
        summary,
        vec![("court-1", "Court 1", 90), ("court-1", "Court 1", 90), ("court-2", "Court 2", 60)]
    );
    assert_eq!(set.slots[0].start_time, Utc.with_ymd_and_hms(2026, 2, 15, 10, 0, 0).unwrap());
    assert_eq!(set.slots[1].start_time, Utc.with_ymd_and_hms(2026, 2, 15, 14, 0, 0).unwrap());
    assert_eq!(set.slots[2].price, "18.00 EUR");
}

#[test]
fn absent_bounds_default_to_the_whole_day() {
    let f = finder(StubTransport::new().respond(AVAILABILITY, "[]"));

    f.fetch(&lemon_venue(), date(), None, None).unwrap();

    let call = &f.transport().calls()[0];
    assert_eq!(call.param("tenant_id"), Some("lemon-123"));
    assert_eq!(call.param("date"), Some("2026-02-15"));
    assert_eq!(call.param("sport_id"), Some("PADEL"));
    assert_eq!(call.param("start_min"), Some("2026-02-15T00:00:00"));
    assert_eq!(call.param("start_max"), Some("2026-02-15T23:59:59"));
}

#[test]
fn utc_bounds_are_passed_through_unchanged() {
    let f = finder(StubTransport::new().respond(AVAILABILITY, "[]"));

    f.fetch(
        &lemon_venue(),
        date(),
        NaiveTime::from_hms_opt(7, 0, 0),
        NaiveTime::from_hms_opt(19, 30, 0),
    )
    .unwrap();

    let call = &f.transport().calls()[0];
    assert_eq!(call.param("start_min"), Some("2026-02-15T07:00:00"));
    assert_eq!(call.param("start_max"), Some("2026-02-15T19:30:59"));
}

#[test]
fn empty_response_is_an_empty_set_not_an_error() {
    let f = finder(StubTransport::new().respond(AVAILABILITY, "[]"));

    let set = f.fetch(&lemon_venue(), date(), None, None).unwrap();

    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn bad_records_are_skipped_without_losing_the_rest() {
    let f = finder(StubTransport::new().respond(AVAILABILITY, availability_messy()));

    let set = f.fetch(&lemon_venue(), date(), None, None).unwrap();

    let kept: Vec<(String, String)> = set
        .slots
        .iter()
        .map(|s| (s.court_id.clone(), s.start_time.format("%H:%M").to_string()))
        .collect();
    assert_eq!(
        kept,
        vec![
            ("court-1".to_string(), "09:00".to_string()),
            ("court-1".to_string(), "12:00".to_string()),
            ("court-9".to_string(), "15:00".to_string()),
        ]
    );
}

#[test]
fn slots_on_unlisted_courts_are_tagged_not_dropped() {
    let f = finder(StubTransport::new().respond(AVAILABILITY, availability_messy()));

    let set = f.fetch(&lemon_venue(), date(), None, None).unwrap();

    let unknown = set.slots.iter().find(|s| s.court_id == "court-9").expect("court-9 slot kept");
    assert_eq!(unknown.court_name, UNKNOWN_COURT);
}

#[test]
fn invalid_json_and_transport_failures_are_api_errors() {
    let cases = [
        StubTransport::new().respond(AVAILABILITY, "not json"),
        StubTransport::new().respond(AVAILABILITY, r#"{"resource_id": "court-1"}"#),
        StubTransport::new().status(AVAILABILITY, 500),
        StubTransport::new().network_error(AVAILABILITY),
    ];
    for transport in cases {
        let f = finder(transport);
        let err = f.fetch(&lemon_venue(), date(), None, None).unwrap_err();
        match err {
            SlotFinderError::Api { message, .. } => {
                assert!(
                    message.contains("availability"),
                    "message should name what failed: {}",
                    message
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
