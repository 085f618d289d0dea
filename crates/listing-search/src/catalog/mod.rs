pub mod domain;
mod parser;
mod samples;

pub use domain::{City, ListingStatus, MarketingLabel, Property, PropertyId, PropertyType};
pub use samples::{sample_cities, sample_properties};

pub(crate) use parser::split_features;

use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateId(PropertyId),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::DuplicateId(id) => {
                write!(f, "catalog export lists property '{}' more than once", id)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::DuplicateId(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Bulk loader for spreadsheet exports of the listing table.
///
/// Expected headers: `id,title,type,status,price,surface,rooms,city,features,description,catch_phrase`.
/// Trailing columns may be omitted and empty cells load as missing values.
pub struct PropertyCsvImporter;

impl PropertyCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Property>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Property>, CatalogImportError> {
        let properties = parser::parse_properties(reader)?;

        let mut seen = std::collections::HashSet::new();
        for property in &properties {
            if !seen.insert(&property.id) {
                return Err(CatalogImportError::DuplicateId(property.id.clone()));
            }
        }

        Ok(properties)
    }
}
