use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::drafts::{CityDraft, DraftError, PropertyDraft};
use super::repository::{CityRepository, PropertyRepository, RepositoryError};
use crate::catalog::{sample_cities, sample_properties, City, Property, PropertyId};
use crate::config::SearchConfig;
use crate::locations::SectorDirectory;
use crate::search::{FilterCriteria, KeywordRenovationPolicy, ScoredResult, SearchEngine};

/// Where the listings behind a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Store,
    Sample,
}

/// Owned counterpart of [`ScoredResult`] for responses that outlive the catalog borrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedListing {
    #[serde(flatten)]
    pub property: Property,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_criteria: Vec<String>,
}

impl From<ScoredResult<'_>> for RankedListing {
    fn from(result: ScoredResult<'_>) -> Self {
        Self {
            property: result.property.clone(),
            match_score: result.match_score,
            missing_criteria: result.missing_criteria,
        }
    }
}

/// Search response: ranked listings plus the counts that annotate the city selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub source: CatalogSource,
    pub catalog_size: usize,
    pub results: Vec<RankedListing>,
    pub city_counts: BTreeMap<String, usize>,
}

/// Service composing the listing store, the city directory, and the search engine.
pub struct ListingService<P, C> {
    properties: Arc<P>,
    cities: Arc<C>,
    engine: Arc<SearchEngine>,
    sector_order: Vec<String>,
}

static PROPERTY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_property_id() -> PropertyId {
    let id = PROPERTY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("prop-{id:06}"))
}

impl<P, C> ListingService<P, C>
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    pub fn new(properties: Arc<P>, cities: Arc<C>, config: &SearchConfig) -> Self {
        let renovation = KeywordRenovationPolicy::new(&config.renovation_keywords);
        let engine = SearchEngine::new(config.weights, Arc::new(renovation));
        Self::with_engine(properties, cities, engine, config.sector_order.clone())
    }

    pub fn with_engine(
        properties: Arc<P>,
        cities: Arc<C>,
        engine: SearchEngine,
        sector_order: Vec<String>,
    ) -> Self {
        Self {
            properties,
            cities,
            engine: Arc::new(engine),
            sector_order,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Full catalog, newest first. Falls back to the static sample set when the store fails
    /// or holds nothing.
    pub fn load_properties(&self) -> (Vec<Property>, CatalogSource) {
        match self.properties.list() {
            Ok(mut properties) if !properties.is_empty() => {
                // Undated rows sort last; `sort_by` keeps their store order.
                properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                (properties, CatalogSource::Store)
            }
            Ok(_) => {
                warn!("listing store is empty; serving sample listings");
                (sample_properties(), CatalogSource::Sample)
            }
            Err(err) => {
                warn!(error = %err, "listing store unavailable; serving sample listings");
                (sample_properties(), CatalogSource::Sample)
            }
        }
    }

    pub fn search(&self, criteria: &FilterCriteria) -> SearchOutcome {
        let (properties, source) = self.load_properties();
        let city_counts = self.engine.city_counts(&properties, criteria);
        let results: Vec<RankedListing> = self
            .engine
            .evaluate(&properties, criteria)
            .into_iter()
            .map(RankedListing::from)
            .collect();

        info!(
            source = ?source,
            catalog = properties.len(),
            matches = results.len(),
            "property search evaluated"
        );

        SearchOutcome {
            source,
            catalog_size: properties.len(),
            results,
            city_counts,
        }
    }

    /// Look a listing up in whatever catalog searches currently serve.
    pub fn get_property(&self, id: &PropertyId) -> Result<Property, ListingServiceError> {
        let (properties, _) = self.load_properties();
        properties
            .into_iter()
            .find(|property| &property.id == id)
            .ok_or(ListingServiceError::Repository(RepositoryError::NotFound))
    }

    pub fn create_property(&self, draft: PropertyDraft) -> Result<Property, ListingServiceError> {
        let property = draft.into_property(next_property_id(), Utc::now())?;
        let stored = self.properties.insert(property)?;
        info!(property_id = %stored.id, city = %stored.city, "listing created");
        Ok(stored)
    }

    /// Replace a listing's content while keeping its identity and creation time.
    pub fn update_property(
        &self,
        id: &PropertyId,
        draft: PropertyDraft,
    ) -> Result<Property, ListingServiceError> {
        let existing = self
            .properties
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        let created_at = existing.created_at.unwrap_or_else(Utc::now);

        let property = draft.into_property(id.clone(), created_at)?;
        self.properties.update(property.clone())?;
        info!(property_id = %id, "listing updated");
        Ok(property)
    }

    pub fn delete_property(&self, id: &PropertyId) -> Result<(), ListingServiceError> {
        self.properties.delete(id)?;
        info!(property_id = %id, "listing deleted");
        Ok(())
    }

    /// Cities grouped by sector in the configured display order. Falls back to the sample
    /// cities when the directory fails or is empty.
    pub fn sectors(&self) -> SectorDirectory {
        let cities = match self.cities.list() {
            Ok(cities) if !cities.is_empty() => cities,
            Ok(_) => {
                warn!("city directory is empty; serving sample cities");
                sample_cities()
            }
            Err(err) => {
                warn!(error = %err, "city directory unavailable; serving sample cities");
                sample_cities()
            }
        };
        SectorDirectory::group_by_sector(&cities, self.sector_order.as_slice())
    }

    pub fn add_city(&self, draft: CityDraft) -> Result<City, ListingServiceError> {
        let city = draft.into_city()?;
        let stored = self.cities.insert(city)?;
        info!(city = %stored.name, "city added");
        Ok(stored)
    }

    /// Rename a city or move it to another sector.
    pub fn update_city(&self, name: &str, draft: CityDraft) -> Result<City, ListingServiceError> {
        let city = draft.into_city()?;
        self.cities.update(name.trim(), city.clone())?;
        info!(previous = %name, city = %city.name, "city updated");
        Ok(city)
    }

    pub fn remove_city(&self, name: &str) -> Result<(), ListingServiceError> {
        self.cities.delete(name.trim())?;
        info!(city = %name, "city removed");
        Ok(())
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
