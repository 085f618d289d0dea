//! City/sector reference data and the multi-select location filter built on it.

mod sectors;
mod selector;

pub use sectors::{SectorDirectory, SectorGroup, DEFAULT_SECTOR_ORDER, FALLBACK_SECTOR};
pub use selector::{CityCounts, CityOption, LocationSelector, SectorOptions};
