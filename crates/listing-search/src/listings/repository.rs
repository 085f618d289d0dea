use crate::catalog::{City, Property, PropertyId};

/// Storage abstraction over the hosted listing table so the service can run in isolation.
pub trait PropertyRepository: Send + Sync {
    /// Full catalog, no filtering pushed down.
    fn list(&self) -> Result<Vec<Property>, RepositoryError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
    fn insert(&self, property: Property) -> Result<Property, RepositoryError>;
    fn update(&self, property: Property) -> Result<(), RepositoryError>;
    fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError>;
}

/// Storage abstraction over the city reference table.
pub trait CityRepository: Send + Sync {
    fn list(&self) -> Result<Vec<City>, RepositoryError>;
    fn insert(&self, city: City) -> Result<City, RepositoryError>;
    /// Replace the entry stored under `name`, which may rename it.
    fn update(&self, name: &str, city: City) -> Result<(), RepositoryError>;
    fn delete(&self, name: &str) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
