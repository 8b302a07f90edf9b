pub mod court;
pub mod selector;
pub mod slot;
pub mod venue;
pub mod wire;

pub use court::{Court, CourtType};
pub use selector::{SelectorKind, VenueSelector};
pub use slot::{AvailabilitySet, Slot, UNKNOWN_COURT};
pub use venue::{Venue, VenueSummary};
