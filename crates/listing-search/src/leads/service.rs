use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{LeadError, LeadSubmission};
use super::relay::{LeadId, LeadRecord, LeadRelay, RelayError};

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Validates public form submissions and forwards them through the configured relay.
pub struct LeadService<R> {
    relay: Arc<R>,
}

impl<R> LeadService<R>
where
    R: LeadRelay + 'static,
{
    pub fn new(relay: Arc<R>) -> Self {
        Self { relay }
    }

    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadServiceError> {
        submission.validate()?;

        let record = LeadRecord {
            lead_id: next_lead_id(),
            kind: submission.kind(),
            received_at: Utc::now(),
            submission,
        };

        if let Err(err) = self.relay.publish(&record) {
            warn!(lead_id = %record.lead_id, error = %err, "lead relay failed");
            return Err(err.into());
        }

        info!(lead_id = %record.lead_id, kind = ?record.kind, "lead relayed");
        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Invalid(#[from] LeadError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}
