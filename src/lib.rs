//! Slot discovery for padel venues listed on a third-party booking platform.
//!
//! [`SlotFinder`] resolves a venue, fetches its availability for a date and
//! narrows it by court type, local time window and duration. The `handler`
//! module exposes the same operations as agent tool calls.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod finder;
pub mod format;
pub mod geocode;
pub mod handler;
pub mod link;
pub mod model;
pub mod platform;
pub mod resolver;

pub use config::Config;
pub use error::SlotFinderError;
pub use filter::{SlotQuery, filter_slots};
pub use finder::SlotFinder;
pub use model::{AvailabilitySet, Court, CourtType, Slot, Venue, VenueSelector, VenueSummary};
pub use platform::{HttpTransport, Transport};
