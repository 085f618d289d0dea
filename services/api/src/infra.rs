use listing_search::catalog::{City, ListingStatus, Property, PropertyId, PropertyType};
use listing_search::leads::{LeadRecord, LeadRelay, RelayError};
use listing_search::listings::{CityRepository, PropertyRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPropertyRepository {
    records: Arc<Mutex<Vec<Property>>>,
}

impl InMemoryPropertyRepository {
    pub(crate) fn seeded(properties: Vec<Property>) -> Self {
        Self {
            records: Arc::new(Mutex::new(properties)),
        }
    }
}

impl PropertyRepository for InMemoryPropertyRepository {
    fn list(&self) -> Result<Vec<Property>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.iter().find(|property| &property.id == id).cloned())
    }

    fn insert(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.iter().any(|existing| existing.id == property.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(property.clone());
        Ok(property)
    }

    fn update(&self, property: Property) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        match guard.iter_mut().find(|existing| existing.id == property.id) {
            Some(slot) => {
                *slot = property;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let before = guard.len();
        guard.retain(|property| &property.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCityRepository {
    records: Arc<Mutex<Vec<City>>>,
}

impl InMemoryCityRepository {
    pub(crate) fn seeded(cities: Vec<City>) -> Self {
        Self {
            records: Arc::new(Mutex::new(cities)),
        }
    }
}

impl CityRepository for InMemoryCityRepository {
    fn list(&self) -> Result<Vec<City>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn insert(&self, city: City) -> Result<City, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard
            .iter()
            .any(|existing| same_city_name(&existing.name, &city.name))
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(city.clone());
        Ok(city)
    }

    fn update(&self, name: &str, city: City) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let taken = guard
            .iter()
            .any(|existing| existing.name != name && same_city_name(&existing.name, &city.name));
        if taken {
            return Err(RepositoryError::Conflict);
        }
        match guard.iter_mut().find(|existing| existing.name == name) {
            Some(slot) => {
                *slot = city;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let before = guard.len();
        guard.retain(|city| city.name != name);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

/// Relay that records leads and logs them; stands in for the form-to-mail service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRelay {
    leads: Arc<Mutex<Vec<LeadRecord>>>,
}

impl LeadRelay for InMemoryLeadRelay {
    fn publish(&self, lead: &LeadRecord) -> Result<(), RelayError> {
        info!(
            lead_id = %lead.lead_id,
            fields = ?lead.fields(),
            "lead captured"
        );
        let mut guard = self
            .leads
            .lock()
            .map_err(|_| RelayError::Transport("lead log lock poisoned".to_string()))?;
        guard.push(lead.clone());
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryLeadRelay {
    pub(crate) fn leads(&self) -> Vec<LeadRecord> {
        self.leads.lock().expect("relay mutex poisoned").clone()
    }
}

fn same_city_name(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

pub(crate) fn parse_status(raw: &str) -> Result<ListingStatus, String> {
    ListingStatus::parse(raw)
        .ok_or_else(|| format!("unknown listing status '{raw}' (expected sale or rental)"))
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::parse(raw).ok_or_else(|| {
        format!("unknown property type '{raw}' (expected house, apartment, land, building or commercial)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_names_conflict_regardless_of_case() {
        let repository = InMemoryCityRepository::seeded(vec![
            City::new("Audun", "Secteur Nord"),
            City::new("AUDUN-LE-TICHE", "Secteur Nord"),
        ]);

        assert!(matches!(
            repository.insert(City::new("audun", "Secteur Nord")),
            Err(RepositoryError::Conflict)
        ));
        assert!(matches!(
            repository.update("Audun", City::new("audun-le-tiche", "Secteur Nord")),
            Err(RepositoryError::Conflict)
        ));

        repository
            .update("Audun", City::new("AUDUN", "Secteur Nord"))
            .expect("recasing a city keeps it unique");
        let names: Vec<String> = repository
            .list()
            .expect("list")
            .into_iter()
            .map(|city| city.name)
            .collect();
        assert_eq!(names, vec!["AUDUN", "AUDUN-LE-TICHE"]);
    }
}
