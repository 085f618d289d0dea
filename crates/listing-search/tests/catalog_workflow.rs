use std::sync::{Arc, Mutex};

use listing_search::catalog::{
    City, CatalogImportError, ListingStatus, Property, PropertyCsvImporter, PropertyId,
    PropertyType,
};
use listing_search::config::SearchConfig;
use listing_search::listings::{
    CatalogSource, CityRepository, ListingService, PropertyRepository, RepositoryError,
};
use listing_search::search::{FilterCriteria, NO_WORK_NEEDED};

const EXPORT: &str = "\
id,title,type,status,price,surface,rooms,city,features,description,catch_phrase
m-01,Maison de ville,Maison,Vente,245 000,\"98,5\",,Longwy,3 Chambres|Garage|Jardin,Maison rénovée avec goût,
m-02,Appartement F2,Appartement,Location,650,48,2,Longwy,Balcon,Proche gare,
m-03,Ferme à restaurer,Maison,Vente,139000,210,6,Spincourt,Grange|Terrain,Gros potentiel,Travaux à prévoir
m-04,Terrain constructible,Terrain,,58000,720,,Crusnes,Viabilisé
";

#[derive(Default)]
struct Store {
    properties: Mutex<Vec<Property>>,
    cities: Mutex<Vec<City>>,
}

impl PropertyRepository for Store {
    fn list(&self) -> Result<Vec<Property>, RepositoryError> {
        Ok(self.properties.lock().expect("store mutex poisoned").clone())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self
            .properties
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    fn insert(&self, property: Property) -> Result<Property, RepositoryError> {
        self.properties
            .lock()
            .expect("store mutex poisoned")
            .push(property.clone());
        Ok(property)
    }

    fn update(&self, property: Property) -> Result<(), RepositoryError> {
        let mut guard = self.properties.lock().expect("store mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|p| p.id == property.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = property;
        Ok(())
    }

    fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        self.properties
            .lock()
            .expect("store mutex poisoned")
            .retain(|p| &p.id != id);
        Ok(())
    }
}

impl CityRepository for Store {
    fn list(&self) -> Result<Vec<City>, RepositoryError> {
        Ok(self.cities.lock().expect("store mutex poisoned").clone())
    }

    fn insert(&self, city: City) -> Result<City, RepositoryError> {
        self.cities
            .lock()
            .expect("store mutex poisoned")
            .push(city.clone());
        Ok(city)
    }

    fn update(&self, name: &str, city: City) -> Result<(), RepositoryError> {
        let mut guard = self.cities.lock().expect("store mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or(RepositoryError::NotFound)?;
        *slot = city;
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        self.cities
            .lock()
            .expect("store mutex poisoned")
            .retain(|c| c.name != name);
        Ok(())
    }
}

#[test]
fn importer_reads_french_spreadsheet_exports() {
    let properties = PropertyCsvImporter::from_reader(EXPORT.as_bytes()).expect("import succeeds");

    assert_eq!(properties.len(), 4);
    let townhouse = &properties[0];
    assert_eq!(townhouse.property_type, Some(PropertyType::House));
    assert_eq!(townhouse.status, Some(ListingStatus::Sale));
    assert_eq!(townhouse.price, Some(245_000));
    assert_eq!(townhouse.surface, Some(98.5));
    assert_eq!(townhouse.rooms, None);
    assert_eq!(townhouse.features, vec!["3 Chambres", "Garage", "Jardin"]);

    let land = &properties[3];
    assert_eq!(land.status, None);
    assert_eq!(land.status_or_default(), ListingStatus::Sale);
    assert!(land.catch_phrase.is_empty());
}

#[test]
fn importer_rejects_duplicate_ids() {
    let export = "id,title,city\nm-01,Maison,Longwy\nm-01,Maison bis,Longwy\n";

    match PropertyCsvImporter::from_reader(export.as_bytes()) {
        Err(CatalogImportError::DuplicateId(id)) => assert_eq!(id.0, "m-01"),
        other => panic!("expected duplicate id error, got {other:?}"),
    }
}

#[test]
fn imported_catalog_flows_through_the_listing_service() {
    let store = Arc::new(Store::default());
    for property in PropertyCsvImporter::from_reader(EXPORT.as_bytes()).expect("import succeeds") {
        PropertyRepository::insert(store.as_ref(), property).expect("insert succeeds");
    }
    CityRepository::insert(store.as_ref(), City::new("Longwy", "Bassin de Longwy & Frontières"))
        .expect("insert succeeds");
    let service = ListingService::new(store.clone(), store, &SearchConfig::default());

    let criteria = FilterCriteria::default()
        .with_status(Some(ListingStatus::Sale))
        .with_type(Some(PropertyType::House))
        .with_min_rooms(Some(3))
        .with_features([NO_WORK_NEEDED]);
    let outcome = service.search(&criteria);

    assert_eq!(outcome.source, CatalogSource::Store);
    assert_eq!(outcome.catalog_size, 4);
    let ranked: Vec<(&str, Option<u8>)> = outcome
        .results
        .iter()
        .map(|r| (r.property.id.0.as_str(), r.match_score))
        .collect();
    assert_eq!(ranked, vec![("m-01", Some(100)), ("m-03", Some(90))]);
    assert_eq!(outcome.results[1].missing_criteria, vec!["Renovation needed"]);
    assert_eq!(outcome.city_counts.get("Spincourt"), Some(&1));
    assert_eq!(outcome.city_counts.get("Crusnes"), None);

    let sectors = service.sectors();
    assert_eq!(sectors.groups().len(), 1);
    assert_eq!(sectors.cities_in("Bassin de Longwy & Frontières"), &["Longwy".to_string()]);
}
