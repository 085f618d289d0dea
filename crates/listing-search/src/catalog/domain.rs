use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of good being advertised. The store holds the French labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(alias = "Maison")]
    House,
    #[serde(alias = "Appartement")]
    Apartment,
    #[serde(alias = "Terrain")]
    Land,
    #[serde(alias = "Immeuble")]
    Building,
    #[serde(alias = "Local commercial", alias = "Commerce")]
    Commercial,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Land => "Land",
            PropertyType::Building => "Building",
            PropertyType::Commercial => "Commercial",
        }
    }

    /// Parse either the English or the French label, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "house" | "maison" => Some(Self::House),
            "apartment" | "appartement" => Some(Self::Apartment),
            "land" | "terrain" => Some(Self::Land),
            "building" | "immeuble" => Some(Self::Building),
            "commercial" | "commerce" | "local commercial" => Some(Self::Commercial),
            _ => None,
        }
    }
}

/// Transaction kind of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    #[serde(alias = "Vente")]
    Sale,
    #[serde(alias = "Location")]
    Rental,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Sale => "Sale",
            ListingStatus::Rental => "Rental",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "sale" | "vente" => Some(Self::Sale),
            "rental" | "rent" | "location" => Some(Self::Rental),
            _ => None,
        }
    }
}

/// Badge shown on listing cards. Never used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketingLabel {
    #[serde(alias = "Disponible")]
    Available,
    #[serde(alias = "Nouveauté")]
    New,
    #[serde(alias = "Exclusivité")]
    Exclusive,
    #[serde(alias = "Sous offre")]
    UnderOffer,
    #[serde(alias = "Sous compromis")]
    UnderContract,
    #[serde(alias = "Vendu")]
    Sold,
    #[serde(alias = "Baisse de prix")]
    PriceDrop,
    #[serde(alias = "Loué")]
    Rented,
}

/// Listing record as held by the data store.
///
/// Every attribute the search reads is optional so partially filled admin drafts and
/// legacy rows still load; the engine applies its own fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default, alias = "marketing_status")]
    pub marketing_label: Option<MarketingLabel>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub surface: Option<f64>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    pub fn status_or_default(&self) -> ListingStatus {
        self.status.unwrap_or_default()
    }

    pub fn price_or_zero(&self) -> u64 {
        self.price.unwrap_or(0)
    }

    pub fn surface_or_zero(&self) -> f64 {
        self.surface.unwrap_or(0.0)
    }
}

/// Reference entry used to group cities in the location selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
}

impl City {
    pub fn new(name: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sector: Some(sector.into()),
        }
    }
}
