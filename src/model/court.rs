use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SlotFinderError;

/// Player capacity of a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum CourtType {
    Single,
    Double,
}

impl CourtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourtType::Single => "SINGLE",
            CourtType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for CourtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourtType {
    type Err = SlotFinderError;

    /// Accepts any casing; the platform is not consistent about it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("single") {
            Ok(CourtType::Single)
        } else if trimmed.eq_ignore_ascii_case("double") {
            Ok(CourtType::Double)
        } else {
            Err(SlotFinderError::validation(
                format!("Unknown court type '{}', expected SINGLE or DOUBLE", s),
                "court_type",
            ))
        }
    }
}

impl TryFrom<String> for CourtType {
    type Error = SlotFinderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single bookable playing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Court {
    id: String,
    name: String,
    #[serde(rename = "type")]
    court_type: CourtType,
}

impl Court {
    pub fn new(id: impl Into<String>, name: impl Into<String>, court_type: CourtType) -> Self {
        Self { id: id.into(), name: name.into(), court_type }
    }

    /// Build a court from the platform's raw size string (`"double"`, `"SINGLE"`, ...).
    pub fn from_raw(id: impl Into<String>, name: impl Into<String>, raw_type: &str) -> Result<Self, SlotFinderError> {
        Ok(Self::new(id, name, raw_type.parse()?))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn court_type(&self) -> CourtType {
        self.court_type
    }
}

impl fmt::Display for Court {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
