use serde::{Deserialize, Serialize};

use crate::catalog::{PropertyId, PropertyType};

/// Inbound request from the public contact or estimation forms.
///
/// The `kind` tag selects the form; contact details are shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub request: LeadRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadRequest {
    Contact {
        message: String,
        /// Listing the visitor was looking at, when the form was opened from a detail page.
        #[serde(default)]
        property_id: Option<PropertyId>,
    },
    Estimation {
        #[serde(rename = "type")]
        property_type: PropertyType,
        city: String,
        surface: f64,
        #[serde(default)]
        rooms: Option<u32>,
    },
}

/// Form-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("name is required")]
    MissingName,
    #[error("a valid e-mail address is required")]
    InvalidEmail,
    #[error("message is required")]
    MissingMessage,
    #[error("city of the property to estimate is required")]
    MissingCity,
    #[error("surface must be a positive number of square meters")]
    InvalidSurface,
}

impl LeadSubmission {
    pub fn validate(&self) -> Result<(), LeadError> {
        if self.name.trim().is_empty() {
            return Err(LeadError::MissingName);
        }

        if !looks_like_email(self.email.trim()) {
            return Err(LeadError::InvalidEmail);
        }

        match &self.request {
            LeadRequest::Contact { message, .. } => {
                if message.trim().is_empty() {
                    return Err(LeadError::MissingMessage);
                }
            }
            LeadRequest::Estimation { city, surface, .. } => {
                if city.trim().is_empty() {
                    return Err(LeadError::MissingCity);
                }
                if !surface.is_finite() || *surface <= 0.0 {
                    return Err(LeadError::InvalidSurface);
                }
            }
        }

        Ok(())
    }

    pub fn kind(&self) -> LeadKind {
        match self.request {
            LeadRequest::Contact { .. } => LeadKind::Contact,
            LeadRequest::Estimation { .. } => LeadKind::Estimation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    Contact,
    Estimation,
}

impl LeadKind {
    /// Subject line used when the lead is relayed by e-mail.
    pub const fn subject(self) -> &'static str {
        match self {
            LeadKind::Contact => "New contact message",
            LeadKind::Estimation => "New estimation request",
        }
    }
}

// Something before '@', and a dot somewhere after it.
fn looks_like_email(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !raw.contains(char::is_whitespace) && domain.contains('.')
        }
        None => false,
    }
}
