use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SlotFinderError;

/// Which field of the platform directory a selector is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Slug,
    Name,
}

impl SelectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorKind::Slug => "slug",
            SelectorKind::Name => "name",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input identifying exactly one venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSelector {
    Identifier(String),
    Name(String),
}

impl VenueSelector {
    /// Build a selector from two optional inputs, exactly one of which must be non-blank.
    pub fn from_parts(identifier: Option<&str>, name: Option<&str>) -> Result<Self, SlotFinderError> {
        let identifier = identifier.map(str::trim).filter(|s| !s.is_empty());
        let name = name.map(str::trim).filter(|s| !s.is_empty());
        match (identifier, name) {
            (Some(slug), None) => Ok(VenueSelector::Identifier(slug.to_string())),
            (None, Some(name)) => Ok(VenueSelector::Name(name.to_string())),
            (None, None) => Err(SlotFinderError::validation(
                "Either identifier or name must be provided",
                "identifier",
            )),
            (Some(_), Some(_)) => Err(SlotFinderError::validation(
                "Provide either identifier or name, not both",
                "identifier",
            )),
        }
    }

    pub fn kind(&self) -> SelectorKind {
        match self {
            VenueSelector::Identifier(_) => SelectorKind::Slug,
            VenueSelector::Name(_) => SelectorKind::Name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            VenueSelector::Identifier(v) | VenueSelector::Name(v) => v,
        }
    }

    /// Query parameter the directory endpoint expects for this selector.
    pub(crate) fn query_param(&self) -> &'static str {
        match self {
            VenueSelector::Identifier(_) => "tenant_uid",
            VenueSelector::Name(_) => "tenant_name",
        }
    }
}
