use std::collections::HashSet;
use std::fmt;

use chrono_tz::Tz;
use serde::Serialize;

use crate::error::SlotFinderError;
use crate::model::court::{Court, CourtType};

/// A facility with its courts, as resolved from the platform directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    identifier: String,
    name: String,
    venue_id: String,
    timezone: Tz,
    courts: Vec<Court>,
}

impl Venue {
    /// Rejects a court list that repeats an id.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        venue_id: impl Into<String>,
        timezone: Tz,
        courts: Vec<Court>,
    ) -> Result<Self, SlotFinderError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(courts.len());
        for court in &courts {
            if !seen.insert(court.id()) {
                return Err(SlotFinderError::validation(
                    format!("Duplicate court id '{}'", court.id()),
                    "courts",
                ));
            }
        }
        Ok(Self {
            identifier: identifier.into(),
            name: name.into(),
            venue_id: venue_id.into(),
            timezone,
            courts,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn court_by_id(&self, court_id: &str) -> Option<&Court> {
        self.courts.iter().find(|c| c.id() == court_id)
    }

    pub fn courts_of_type(&self, court_type: CourtType) -> impl Iterator<Item = &Court> {
        self.courts.iter().filter(move |c| c.court_type() == court_type)
    }

    /// Ids of the courts a type filter targets; `None` means every known court.
    pub fn court_ids(&self, court_type: Option<CourtType>) -> HashSet<&str> {
        match court_type {
            Some(t) => self.courts_of_type(t).map(Court::id).collect(),
            None => self.courts.iter().map(Court::id).collect(),
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!(" {} ({}) ", self.name, self.identifier);
        let line = "#".repeat(header.chars().count());
        writeln!(f, "{}", line)?;
        writeln!(f, "{}", header)?;
        writeln!(f, " {} ", self.venue_id)?;
        writeln!(f, "{}", line)?;
        write!(f, "Courts:")?;
        for court in &self.courts {
            write!(f, "\n  - {} [{}]", court, court.court_type())?;
        }
        Ok(())
    }
}

/// Lightweight search hit; carries no court list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub name: String,
    #[serde(rename = "slug")]
    pub identifier: String,
    #[serde(rename = "id")]
    pub venue_id: String,
    pub timezone: String,
}
