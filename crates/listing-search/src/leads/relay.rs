use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{LeadKind, LeadRequest, LeadSubmission};

/// Identifier wrapper for captured leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated lead, stamped on receipt and ready to hand to a relay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRecord {
    pub lead_id: LeadId,
    pub kind: LeadKind,
    pub received_at: DateTime<Utc>,
    pub submission: LeadSubmission,
}

impl LeadRecord {
    /// Flat field list in the shape form-to-mail relays expect.
    pub fn fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        let submission = &self.submission;
        fields.insert("subject".to_string(), self.kind.subject().to_string());
        fields.insert("name".to_string(), submission.name.trim().to_string());
        fields.insert("email".to_string(), submission.email.trim().to_string());
        if let Some(phone) = submission
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
        {
            fields.insert("phone".to_string(), phone.to_string());
        }

        match &submission.request {
            LeadRequest::Contact {
                message,
                property_id,
            } => {
                fields.insert("message".to_string(), message.trim().to_string());
                if let Some(property_id) = property_id {
                    fields.insert("property_id".to_string(), property_id.to_string());
                }
            }
            LeadRequest::Estimation {
                property_type,
                city,
                surface,
                rooms,
            } => {
                fields.insert("type".to_string(), property_type.label().to_string());
                fields.insert("city".to_string(), city.trim().to_string());
                fields.insert("surface".to_string(), format!("{surface} m²"));
                if let Some(rooms) = rooms {
                    fields.insert("rooms".to_string(), rooms.to_string());
                }
            }
        }

        fields.insert("received_at".to_string(), self.received_at.to_rfc3339());
        fields
    }
}

/// Outbound hook that forwards leads to the agency (form-to-mail service, CRM, ...).
pub trait LeadRelay: Send + Sync {
    fn publish(&self, lead: &LeadRecord) -> Result<(), RelayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("lead relay unavailable: {0}")]
    Transport(String),
    #[error("lead relay rejected the submission: {0}")]
    Rejected(String),
}
