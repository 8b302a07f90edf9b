use chrono::NaiveDate;
use padel_slot_finder::model::{AvailabilitySet, Court, CourtType, SelectorKind, Venue, VenueSelector};
use padel_slot_finder::SlotFinderError;
use serde_json::json;

#[test]
fn court_type_parses_any_casing() {
    assert_eq!("double".parse::<CourtType>().unwrap(), CourtType::Double);
    assert_eq!(" Single ".parse::<CourtType>().unwrap(), CourtType::Single);
    assert_eq!("DOUBLE".parse::<CourtType>().unwrap(), CourtType::Double);
    assert!("padel".parse::<CourtType>().is_err());

    let parsed: CourtType = serde_json::from_value(json!("single")).unwrap();
    assert_eq!(parsed, CourtType::Single);
    assert_eq!(serde_json::to_value(CourtType::Double).unwrap(), json!("DOUBLE"));
}

#[test]
fn court_from_raw_size() {
    let court = Court::from_raw("court-1", "Court 1", "double").unwrap();
    assert_eq!(court.court_type(), CourtType::Double);
    assert_eq!(court.to_string(), "Court 1 (court-1)");
    assert!(Court::from_raw("court-1", "Court 1", "").is_err());
    assert_eq!(
        serde_json::to_value(&court).unwrap(),
        json!({ "id": "court-1", "name": "Court 1", "type": "DOUBLE" })
    );
}

#[test]
fn venue_rejects_duplicate_court_ids() {
    let err = Venue::new(
        "club",
        "Club",
        "club-1",
        chrono_tz::Europe::Berlin,
        vec![
            Court::new("c1", "One", CourtType::Double),
            Court::new("c1", "One again", CourtType::Single),
        ],
    )
    .unwrap_err();
    match err {
        SlotFinderError::Validation { field, message } => {
            assert_eq!(field.as_deref(), Some("courts"));
            assert!(message.contains("c1"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn venue_court_lookups() {
    let venue = Venue::new(
        "club",
        "Club",
        "club-1",
        chrono_tz::Europe::Berlin,
        vec![
            Court::new("c1", "One", CourtType::Double),
            Court::new("c2", "Two", CourtType::Single),
            Court::new("c3", "Three", CourtType::Double),
        ],
    )
    .unwrap();

    assert_eq!(venue.court_by_id("c2").map(Court::name), Some("Two"));
    assert!(venue.court_by_id("c9").is_none());
    let doubles: Vec<&str> = venue.courts_of_type(CourtType::Double).map(Court::id).collect();
    assert_eq!(doubles, vec!["c1", "c3"]);
    assert_eq!(venue.court_ids(None).len(), 3);
    assert!(venue.court_ids(Some(CourtType::Single)).contains("c2"));

    let banner = venue.to_string();
    assert!(banner.contains(" Club (club) "));
    assert!(banner.contains("  - Two (c2) [SINGLE]"));
}

#[test]
fn selector_needs_exactly_one_part() {
    assert_eq!(
        VenueSelector::from_parts(Some(" lemon "), None).unwrap(),
        VenueSelector::Identifier("lemon".into())
    );
    let by_name = VenueSelector::from_parts(None, Some("Lemon Padel")).unwrap();
    assert_eq!(by_name.kind(), SelectorKind::Name);
    assert_eq!(by_name.value(), "Lemon Padel");

    assert!(VenueSelector::from_parts(None, None).is_err());
    assert!(VenueSelector::from_parts(Some("lemon"), Some("Lemon")).is_err());
    assert!(VenueSelector::from_parts(Some(""), Some(" ")).is_err());
}

#[test]
fn empty_availability_set() {
    let set = AvailabilitySet::empty("v1", NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert_eq!(set.venue_id, "v1");
}

#[test]
fn error_messages_and_details() {
    let err = SlotFinderError::validation("timezone is required", "timezone");
    assert_eq!(err.to_string(), "timezone is required (field=timezone)");
    assert_eq!(err.kind(), "validation_error");

    let err = SlotFinderError::VenueNotFound { selector: "Lemon".into(), selector_type: SelectorKind::Name };
    assert_eq!(err.to_string(), "Venue not found with name: Lemon (selector=Lemon, selector_type=name)");
    assert_eq!(err.details(), json!({ "selector": "Lemon", "selector_type": "name" }));

    let err = SlotFinderError::api("HTTP status 404", Some(404)).context("Failed to fetch venue");
    assert_eq!(err.to_string(), "Failed to fetch venue: HTTP status 404 (status_code=404)");
    assert_eq!(err.details(), json!({ "status_code": 404 }));

    let err = SlotFinderError::parse("bad body");
    assert_eq!(err.to_string(), "bad body");
    assert_eq!(err.details(), json!({}));

    let err = SlotFinderError::SlotNotFound { venue_selector: "lemon".into(), date: "2026-02-15".into(), filters: vec![] };
    assert_eq!(err.to_string(), "No slots found for lemon on 2026-02-15");
    assert_eq!(err.kind(), "slot_not_found");

    // Context only decorates API errors
    let err = SlotFinderError::validation("bad", "date").context("ignored");
    assert_eq!(err.to_string(), "bad (field=date)");
}
