use super::domain::{ListingStatus, Property, PropertyId, PropertyType};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_properties<R: Read>(reader: R) -> Result<Vec<Property>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut properties = Vec::new();

    for record in csv_reader.records() {
        let mut record = record?;
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row: PropertyRow = record.deserialize(Some(&headers))?;
        properties.push(row.into_property());
    }

    Ok(properties)
}

#[derive(Debug, Deserialize)]
struct PropertyRow {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    property_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    surface: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rooms: Option<String>,
    #[serde(default)]
    city: String,
    #[serde(default)]
    features: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    catch_phrase: String,
}

impl PropertyRow {
    fn into_property(self) -> Property {
        Property {
            id: PropertyId(self.id),
            title: self.title,
            property_type: self.property_type.as_deref().and_then(PropertyType::parse),
            status: self.status.as_deref().and_then(ListingStatus::parse),
            marketing_label: None,
            price: self.price.as_deref().and_then(parse_whole_number),
            surface: self
                .surface
                .as_deref()
                .and_then(|raw| raw.replace(',', ".").parse::<f64>().ok())
                .filter(|value| value.is_finite() && *value >= 0.0),
            rooms: self
                .rooms
                .as_deref()
                .and_then(|raw| raw.parse::<u32>().ok()),
            city: self.city,
            description: self.description,
            catch_phrase: self.catch_phrase,
            features: split_features(&self.features),
            images: Vec::new(),
            created_at: None,
        }
    }
}

/// Split a feature cell on `|` when present, otherwise on commas.
pub(crate) fn split_features(raw: &str) -> Vec<String> {
    let separator = if raw.contains('|') { '|' } else { ',' };
    raw.split(separator)
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_whole_number(raw: &str) -> Option<u64> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '_')
        .collect();
    digits.parse::<u64>().ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
