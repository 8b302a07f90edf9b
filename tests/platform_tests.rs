use std::time::Duration;

use padel_slot_finder::fetcher::availability_query;
use padel_slot_finder::platform::USER_AGENT;
use padel_slot_finder::{HttpTransport, SlotFinderError, Transport};

#[test]
fn connection_failure_is_api_error_without_status() {
    let transport = HttpTransport::new(Duration::from_secs(1));

    let err = transport
        .get("http://127.0.0.1:1/v1/tenants", &[("tenant_uid", "lemon".to_string())])
        .unwrap_err();

    match err {
        SlotFinderError::Api { status_code, message, .. } => {
            assert_eq!(status_code, None);
            assert!(message.starts_with("Request failed"), "message was: {}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn user_agent_names_the_crate() {
    assert!(USER_AGENT.starts_with("padel-slot-finder/"));
}

#[test]
fn availability_query_is_scoped_to_padel() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
    let query = availability_query("lemon-123", date, None, chrono::NaiveTime::from_hms_opt(18, 0, 0));
    assert_eq!(
        query,
        vec![
            ("tenant_id", "lemon-123".to_string()),
            ("date", "2026-02-15".to_string()),
            ("sport_id", "PADEL".to_string()),
            ("start_min", "2026-02-15T00:00:00".to_string()),
            ("start_max", "2026-02-15T18:00:59".to_string()),
        ]
    );
}
