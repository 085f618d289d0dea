//! Catalog service: public search plus the admin editor for listings and cities.
//!
//! Storage stays behind [`PropertyRepository`] and [`CityRepository`]; the hosted store and
//! in-memory doubles both plug in there.

pub mod drafts;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use drafts::{CityDraft, DraftError, PropertyDraft};
pub use repository::{CityRepository, PropertyRepository, RepositoryError};
pub use router::listing_router;
pub use service::{CatalogSource, ListingService, ListingServiceError, RankedListing, SearchOutcome};
