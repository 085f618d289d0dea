use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::catalog::{City, ListingStatus, Property, PropertyId, PropertyType};
use crate::config::SearchConfig;
use crate::listings::drafts::{CityDraft, PropertyDraft};
use crate::listings::repository::{CityRepository, PropertyRepository, RepositoryError};
use crate::listings::{listing_router, ListingService};

pub(super) fn stored_property(id: &str, city: &str, price: u64, day: u32) -> Property {
    Property {
        id: PropertyId(id.to_string()),
        title: format!("Maison {id}"),
        property_type: Some(PropertyType::House),
        status: Some(ListingStatus::Sale),
        marketing_label: None,
        price: Some(price),
        surface: Some(120.0),
        rooms: Some(3),
        city: city.to_string(),
        description: "Maison familiale".to_string(),
        catch_phrase: String::new(),
        features: vec!["Garage".to_string()],
        images: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2025, 9, day, 9, 0, 0).single(),
    }
}

pub(super) fn draft() -> PropertyDraft {
    PropertyDraft {
        title: "  Appartement T3 à Longwy ".to_string(),
        property_type: PropertyType::Apartment,
        status: ListingStatus::Sale,
        marketing_label: None,
        price: 145_000,
        surface: 68.0,
        rooms: Some(2),
        city: "Longwy".to_string(),
        description: "Lumineux, entièrement refait.".to_string(),
        catch_phrase: String::new(),
        features: "Balcon, Cave, ,Ascenseur".to_string(),
        images: vec!["https://cdn.example/1.jpg".to_string(), "  ".to_string()],
    }
}

pub(super) fn city_draft(name: &str, sector: &str) -> CityDraft {
    CityDraft {
        name: name.to_string(),
        sector: sector.to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryProperties {
    records: Mutex<Vec<Property>>,
}

impl MemoryProperties {
    pub(super) fn with(properties: Vec<Property>) -> Self {
        Self {
            records: Mutex::new(properties),
        }
    }
}

impl PropertyRepository for MemoryProperties {
    fn list(&self) -> Result<Vec<Property>, RepositoryError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|property| &property.id == id)
            .cloned())
    }

    fn insert(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if guard.iter().any(|existing| existing.id == property.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(property.clone());
        Ok(property)
    }

    fn update(&self, property: Property) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        match guard.iter_mut().find(|existing| existing.id == property.id) {
            Some(slot) => {
                *slot = property;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        let before = guard.len();
        guard.retain(|property| &property.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub(super) struct MemoryCities {
    records: Mutex<Vec<City>>,
}

impl MemoryCities {
    pub(super) fn with(cities: Vec<City>) -> Self {
        Self {
            records: Mutex::new(cities),
        }
    }
}

impl CityRepository for MemoryCities {
    fn list(&self) -> Result<Vec<City>, RepositoryError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn insert(&self, city: City) -> Result<City, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if guard.iter().any(|existing| existing.name == city.name) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(city.clone());
        Ok(city)
    }

    fn update(&self, name: &str, city: City) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        match guard.iter_mut().find(|existing| existing.name == name) {
            Some(slot) => {
                *slot = city;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        let before = guard.len();
        guard.retain(|city| city.name != name);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

/// Store that is always down, to exercise the sample fallback.
pub(super) struct OfflineStore;

impl PropertyRepository for OfflineStore {
    fn list(&self) -> Result<Vec<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn fetch(&self, _id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn insert(&self, _property: Property) -> Result<Property, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn update(&self, _property: Property) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn delete(&self, _id: &PropertyId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

impl CityRepository for OfflineStore {
    fn list(&self) -> Result<Vec<City>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn insert(&self, _city: City) -> Result<City, RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn update(&self, _name: &str, _city: City) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }

    fn delete(&self, _name: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

pub(super) type MemoryService = ListingService<MemoryProperties, MemoryCities>;

pub(super) fn build_service(
    properties: Vec<Property>,
    cities: Vec<City>,
) -> (MemoryService, Arc<MemoryProperties>, Arc<MemoryCities>) {
    let property_store = Arc::new(MemoryProperties::with(properties));
    let city_store = Arc::new(MemoryCities::with(cities));
    let service = ListingService::new(
        property_store.clone(),
        city_store.clone(),
        &SearchConfig::default(),
    );
    (service, property_store, city_store)
}

pub(super) fn router_for(service: MemoryService) -> axum::Router {
    listing_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collected");
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("valid json")
    }
}
