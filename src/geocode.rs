//! Free-text place lookup used by the location search.

use tracing::{info, warn};

use crate::finder::SlotFinder;
use crate::model::wire::GeocodeRecord;
use crate::platform::Transport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl<T: Transport> SlotFinder<T> {
    /// Resolve a place name to coordinates.
    ///
    /// Any failure, including an empty hit list, is `None`.
    pub fn geocode(&self, query: &str, country: Option<&str>) -> Option<Coordinates> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
        ];
        if let Some(cc) = country {
            params.push(("countrycodes", cc.to_lowercase()));
        }

        let body = match self.transport.get(&self.config.geocoding_url, &params) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, query, "Geocoding request failed");
                return None;
            }
        };
        let hits: Vec<GeocodeRecord> = match serde_json::from_str(&body) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, query, "Geocoding response was not understood");
                return None;
            }
        };

        let hit = hits.into_iter().next()?;
        match (hit.lat.trim().parse::<f64>(), hit.lon.trim().parse::<f64>()) {
            (Ok(lat), Ok(lon)) => {
                info!(query, lat, lon, place = hit.display_name.as_deref().unwrap_or(""), "Geocoded location");
                Some(Coordinates { lat, lon })
            }
            _ => {
                warn!(query, lat = %hit.lat, lon = %hit.lon, "Geocoder returned invalid coordinates");
                None
            }
        }
    }
}
