//! Venue resolution against the platform's tenant directory.

use chrono_tz::Tz;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SlotFinderError};
use crate::finder::SlotFinder;
use crate::model::wire::{ResourceRecord, TenantRecord};
use crate::model::{Court, Venue, VenueSelector, VenueSummary};
use crate::platform::{Transport, decode_json};

/// Sport category every directory and availability query is scoped to.
pub const SPORT_ID: &str = "PADEL";

impl<T: Transport> SlotFinder<T> {
    /// Resolve a selector to exactly one venue with its courts.
    #[instrument(level = "info", skip(self, selector), fields(value = %selector.value(), kind = %selector.kind()))]
    pub fn resolve(&self, selector: &VenueSelector) -> Result<Venue> {
        let query = [(selector.query_param(), selector.value().to_string())];
        let body = self
            .transport
            .get(&self.endpoint("tenants"), &query)
            .map_err(|e| {
                e.context(format!("Failed to fetch venue with {}: {}", selector.kind(), selector.value()))
            })?;
        let mut records: Vec<TenantRecord> = decode_json(&body, "tenant directory")?;

        match records.len() {
            0 => Err(SlotFinderError::VenueNotFound {
                selector: selector.value().to_string(),
                selector_type: selector.kind(),
            }),
            1 => {
                let record = records.remove(0);
                let identifier = match selector {
                    VenueSelector::Identifier(slug) => slug.clone(),
                    VenueSelector::Name(_) => record.tenant_uid.clone().unwrap_or_default(),
                };
                let venue = venue_from_record(identifier, record)?;
                info!(venue = %venue.name(), courts = venue.courts().len(), "Resolved venue");
                Ok(venue)
            }
            count => Err(SlotFinderError::MultipleVenuesFound {
                selector: selector.value().to_string(),
                count,
            }),
        }
    }

    /// Resolve from loose optional inputs; exactly one must be given.
    pub fn resolve_parts(&self, identifier: Option<&str>, name: Option<&str>) -> Result<Venue> {
        let selector = VenueSelector::from_parts(identifier, name)?;
        self.resolve(&selector)
    }

    /// Best-effort venue search by name.
    ///
    /// When the full query finds nothing, trailing words are dropped one at a
    /// time ("Lemon Padel Club Limburg" -> "Lemon Padel Club" -> "Lemon Padel"),
    /// stopping at the first non-empty result or after
    /// `max_name_search_attempts` queries.
    #[instrument(level = "info", skip(self))]
    pub fn search_by_name(&self, query: &str) -> Result<Vec<VenueSummary>> {
        let candidates = name_candidates(query, self.config.max_name_search_attempts);
        if candidates.is_empty() {
            return Err(SlotFinderError::validation("Venue name must not be empty", "name"));
        }

        for candidate in &candidates {
            let venues = self.query_summaries(&[("tenant_name", candidate.clone())])?;
            if !venues.is_empty() {
                info!(candidate = %candidate, found = venues.len(), "Name search matched");
                return Ok(venues);
            }
            debug!(candidate = %candidate, "Name search returned nothing");
        }
        info!(attempts = candidates.len(), "Name search found no venues");
        Ok(Vec::new())
    }

    /// Venues near a free-text place, e.g. "Berlin" or "Cologne".
    ///
    /// A place the geocoder cannot find yields an empty list.
    #[instrument(level = "info", skip(self))]
    pub fn search_by_location(
        &self,
        query: &str,
        country: Option<&str>,
        radius_km: Option<u32>,
    ) -> Result<Vec<VenueSummary>> {
        let country = country.or(self.config.default_country.as_deref());
        let Some(point) = self.geocode(query, country) else {
            info!(query, "No location found, returning no venues");
            return Ok(Vec::new());
        };
        let radius_m = u64::from(radius_km.unwrap_or(self.config.default_radius_km)) * 1000;
        self.query_summaries(&[
            ("coordinate", format!("{},{}", point.lat, point.lon)),
            ("radius", radius_m.to_string()),
            ("sport_id", SPORT_ID.to_string()),
        ])
    }

    fn query_summaries(&self, query: &[(&str, String)]) -> Result<Vec<VenueSummary>> {
        let body = self
            .transport
            .get(&self.endpoint("tenants"), query)
            .map_err(|e| e.context("Failed to search venues"))?;
        let records: Vec<TenantRecord> = decode_json(&body, "tenant directory")?;
        Ok(records.into_iter().filter_map(summary_from_record).collect())
    }
}

/// Query strings of decreasing length, never shorter than two words
/// (a single-word query is only tried when the input has one word).
pub fn name_candidates(query: &str, max_attempts: usize) -> Vec<String> {
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    let shortest = words.len().min(2);
    (shortest..=words.len())
        .rev()
        .map(|n| words[..n].join(" "))
        .take(max_attempts.max(1))
        .collect()
}

/// Map one directory record to a venue, failing on any missing or malformed required field.
pub fn venue_from_record(identifier: String, record: TenantRecord) -> Result<Venue> {
    let name = required(record.tenant_name, "tenant_name")?;
    let venue_id = required(record.tenant_id, "tenant_id")?;
    let tz_name = required(record.address.and_then(|a| a.timezone), "address.timezone")?;
    let timezone: Tz = tz_name
        .parse()
        .map_err(|_| SlotFinderError::parse(format!("Failed to parse venue data: unknown timezone '{}'", tz_name)))?;

    let resources = record.resources.unwrap_or_default();
    let courts = resources
        .into_iter()
        .map(court_from_record)
        .collect::<Result<Vec<Court>>>()?;

    Venue::new(identifier, name, venue_id, timezone, courts)
        .map_err(|e| SlotFinderError::parse(format!("Failed to parse venue data: {}", e)))
}

fn court_from_record(resource: ResourceRecord) -> Result<Court> {
    let id = required(resource.resource_id, "resources[].resource_id")?;
    let name = required(resource.name, "resources[].name")?;
    let size = required(
        resource.properties.and_then(|p| p.resource_size),
        "resources[].properties.resource_size",
    )?;
    Court::from_raw(id, name, &size)
        .map_err(|e| SlotFinderError::parse(format!("Failed to parse venue data: {}", e)))
}

fn summary_from_record(record: TenantRecord) -> Option<VenueSummary> {
    match (record.tenant_name, record.tenant_id) {
        (Some(name), Some(venue_id)) => Some(VenueSummary {
            name,
            identifier: record.tenant_uid.unwrap_or_default(),
            venue_id,
            timezone: record.address.and_then(|a| a.timezone).unwrap_or_default(),
        }),
        (name, id) => {
            warn!(name = ?name, id = ?id, "Skipping venue record without name or id");
            None
        }
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| SlotFinderError::parse(format!("Failed to parse venue data: missing '{}'", field)))
}
