/// Booking page URL for one slot.
///
/// `start_iso` is the UTC start as `YYYY-MM-DDTHH:MM:SS.000Z`; its colons are
/// percent-encoded because the booking page does not accept them raw.
pub fn build_link(base_url: &str, venue_id: &str, court_id: &str, start_iso: &str, duration: u32) -> String {
    format!(
        "{}/payments?type=CUSTOMER_MATCH&tenant_id={}&resource_id={}&start={}&duration={}",
        base_url.trim_end_matches('/'),
        venue_id,
        court_id,
        start_iso.replace(':', "%3A"),
        duration
    )
}
