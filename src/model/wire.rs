//! Raw records as the booking platform and geocoder send them.
//!
//! Every field is optional here; required-field checks live in the parse
//! functions so that a missing key becomes a typed error instead of a
//! deserialization failure of the whole document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantRecord {
    pub tenant_uid: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_id: Option<String>,
    pub address: Option<AddressRecord>,
    #[serde(default)]
    pub resources: Option<Vec<ResourceRecord>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressRecord {
    pub timezone: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub resource_id: Option<String>,
    pub name: Option<String>,
    pub properties: Option<ResourcePropertiesRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcePropertiesRecord {
    pub resource_size: Option<String>,
}

/// One court's block in the availability response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAvailabilityRecord {
    pub resource_id: Option<String>,
    // Kept as raw values so one malformed entry cannot fail the whole block.
    #[serde(default)]
    pub slots: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRecord {
    pub start_time: String,
    pub duration: u32,
    pub price: String,
}

/// Nominatim-style search hit; coordinates arrive as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeRecord {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}
