//! Lead capture for the public contact and estimation forms.

pub mod domain;
pub mod relay;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LeadError, LeadKind, LeadRequest, LeadSubmission};
pub use relay::{LeadId, LeadRecord, LeadRelay, RelayError};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError};
