use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    split_features, City, ListingStatus, MarketingLabel, Property, PropertyId, PropertyType,
};

/// Validation errors raised when admin input cannot become a catalog record.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("listing title is required")]
    MissingTitle,
    #[error("listing city is required")]
    MissingCity,
    #[error("price must be greater than zero")]
    InvalidPrice,
    #[error("surface must be a positive number of square meters")]
    InvalidSurface,
    #[error("city name is required")]
    MissingCityName,
    #[error("sector name is required")]
    MissingSector,
}

/// Admin form payload for creating or editing a listing.
///
/// `features` arrives as the comma-separated text typed in the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub marketing_label: Option<MarketingLabel>,
    pub price: u64,
    pub surface: f64,
    #[serde(default)]
    pub rooms: Option<u32>,
    pub city: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PropertyDraft {
    /// Validate and convert into a catalog record with the given identity.
    pub fn into_property(
        self,
        id: PropertyId,
        created_at: DateTime<Utc>,
    ) -> Result<Property, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }

        let city = self.city.trim();
        if city.is_empty() {
            return Err(DraftError::MissingCity);
        }

        if self.price == 0 {
            return Err(DraftError::InvalidPrice);
        }

        if !self.surface.is_finite() || self.surface <= 0.0 {
            return Err(DraftError::InvalidSurface);
        }

        Ok(Property {
            id,
            title: title.to_string(),
            property_type: Some(self.property_type),
            status: Some(self.status),
            marketing_label: self.marketing_label,
            price: Some(self.price),
            surface: Some(self.surface),
            rooms: self.rooms,
            city: city.to_string(),
            description: self.description.trim().to_string(),
            catch_phrase: self.catch_phrase.trim().to_string(),
            features: split_features(&self.features),
            images: self
                .images
                .into_iter()
                .filter(|image| !image.trim().is_empty())
                .collect(),
            created_at: Some(created_at),
        })
    }
}

/// Admin payload for adding or editing a city entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDraft {
    pub name: String,
    pub sector: String,
}

impl CityDraft {
    pub fn into_city(self) -> Result<City, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingCityName);
        }

        let sector = self.sector.trim();
        if sector.is_empty() {
            return Err(DraftError::MissingSector);
        }

        Ok(City::new(name, sector))
    }
}
