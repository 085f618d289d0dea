pub mod catalog;
pub mod config;
pub mod error;
pub mod leads;
pub mod listings;
pub mod locations;
pub mod search;
pub mod telemetry;
