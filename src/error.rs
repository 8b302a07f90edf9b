//! Error taxonomy shared by every slot-finder operation.

use std::fmt::Display;

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::model::SelectorKind;

#[derive(Error, Debug)]
pub enum SlotFinderError {
    /// The caller passed an invalid or incomplete combination of inputs.
    #[error("{message}{}", suffix("field", .field.as_deref()))]
    Validation { message: String, field: Option<String> },

    /// The selector matched no venue.
    #[error("Venue not found with {selector_type}: {selector} (selector={selector}, selector_type={selector_type})")]
    VenueNotFound { selector: String, selector_type: SelectorKind },

    /// The selector matched several venues; the caller has to disambiguate.
    #[error("Multiple venues ({count}) found for identifier: {selector} (selector={selector}, count={count})")]
    MultipleVenuesFound { selector: String, count: usize },

    /// Transport failure, non-2xx status, or a body that does not match the expected schema.
    #[error("{message}{}", suffix("status_code", .status_code.as_ref()))]
    Api {
        message: String,
        status_code: Option<u16>,
        response_data: Option<Value>,
    },

    /// Raised only by callers that want an empty search to be a failure.
    #[error("No slots found for {venue_selector} on {date}{}", filters_suffix(.filters))]
    SlotNotFound {
        venue_selector: String,
        date: String,
        filters: Vec<(String, String)>,
    },
}

pub type Result<T> = std::result::Result<T, SlotFinderError>;

impl SlotFinderError {
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    pub fn api(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Api { message: message.into(), status_code, response_data: None }
    }

    /// A response body that arrived intact but does not have the expected shape.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::api(message, None)
    }

    /// Prefix the message of an API error with what the caller was doing.
    pub fn context(self, prefix: impl Display) -> Self {
        match self {
            Self::Api { message, status_code, response_data } => Self::Api {
                message: format!("{}: {}", prefix, message),
                status_code,
                response_data,
            },
            other => other,
        }
    }

    /// Stable snake_case name of the variant, used in structured tool responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::VenueNotFound { .. } => "venue_not_found",
            Self::MultipleVenuesFound { .. } => "multiple_venues_found",
            Self::Api { .. } => "api_error",
            Self::SlotNotFound { .. } => "slot_not_found",
        }
    }

    /// Structured context for the error as a JSON object.
    pub fn details(&self) -> Value {
        match self {
            Self::Validation { field, .. } => match field {
                Some(f) => json!({ "field": f }),
                None => json!({}),
            },
            Self::VenueNotFound { selector, selector_type } => {
                json!({ "selector": selector, "selector_type": selector_type.as_str() })
            }
            Self::MultipleVenuesFound { selector, count } => {
                json!({ "selector": selector, "count": count })
            }
            Self::Api { status_code, response_data, .. } => {
                let mut map = Map::new();
                if let Some(code) = status_code {
                    map.insert("status_code".into(), json!(code));
                }
                if let Some(data) = response_data {
                    map.insert("response".into(), data.clone());
                }
                Value::Object(map)
            }
            Self::SlotNotFound { venue_selector, date, filters } => {
                let mut map = Map::new();
                map.insert("venue_selector".into(), json!(venue_selector));
                map.insert("date".into(), json!(date));
                for (k, v) in filters {
                    map.insert(k.clone(), json!(v));
                }
                Value::Object(map)
            }
        }
    }
}

fn suffix<T: Display>(key: &str, value: Option<T>) -> String {
    match value {
        Some(v) => format!(" ({}={})", key, v),
        None => String::new(),
    }
}

fn filters_suffix(filters: &[(String, String)]) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let joined = filters
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" with filters: {}", joined)
}
