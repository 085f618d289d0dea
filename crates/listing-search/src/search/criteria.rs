use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{ListingStatus, PropertyType};

/// Synthetic feature tag satisfied by renovation keywords rather than tag membership.
pub const NO_WORK_NEEDED: &str = "NoWorkNeeded";

/// Active search filters.
///
/// `None` on `status` or `property_type` means "all". An empty `cities` set means
/// **no city restriction**: every city passes, it does not mean "match nothing".
/// Setters consume the value and return the updated criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, deserialize_with = "status_choice")]
    pub status: Option<ListingStatus>,
    #[serde(rename = "type", default, deserialize_with = "type_choice")]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub cities: BTreeSet<String>,
    #[serde(default, deserialize_with = "positive_budget")]
    pub max_budget: Option<u64>,
    #[serde(default, deserialize_with = "positive_surface")]
    pub min_surface: Option<f64>,
    #[serde(default)]
    pub min_rooms: Option<u32>,
    #[serde(default, deserialize_with = "feature_list")]
    pub features: Vec<String>,
}

impl FilterCriteria {
    pub fn with_status(self, status: Option<ListingStatus>) -> Self {
        Self { status, ..self }
    }

    pub fn with_type(self, property_type: Option<PropertyType>) -> Self {
        Self {
            property_type,
            ..self
        }
    }

    pub fn with_cities<I, S>(self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cities: cities.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Zero is treated as unset, like an empty budget field.
    pub fn with_max_budget(self, max_budget: Option<u64>) -> Self {
        Self {
            max_budget: max_budget.filter(|budget| *budget > 0),
            ..self
        }
    }

    pub fn with_min_surface(self, min_surface: Option<f64>) -> Self {
        Self {
            min_surface: min_surface.filter(|surface| surface.is_finite() && *surface > 0.0),
            ..self
        }
    }

    pub fn with_min_rooms(self, min_rooms: Option<u32>) -> Self {
        Self { min_rooms, ..self }
    }

    pub fn with_features<I, S>(self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for feature in features {
            let feature = feature.into();
            let trimmed = feature.trim();
            if !trimmed.is_empty() && !deduped.iter().any(|known| known == trimmed) {
                deduped.push(trimmed.to_string());
            }
        }
        Self {
            features: deduped,
            ..self
        }
    }

    /// Add the feature when absent, remove it when present.
    pub fn toggle_feature(self, feature: &str) -> Self {
        let mut features = self.features.clone();
        match features.iter().position(|known| known == feature) {
            Some(index) => {
                features.remove(index);
            }
            None => features.push(feature.to_string()),
        }
        self.with_features(features)
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Whether any scoring criterion is set.
    pub fn has_soft_criteria(&self) -> bool {
        self.min_surface.is_some() || self.min_rooms.is_some() || !self.features.is_empty()
    }

    pub(crate) fn without_cities(&self) -> Self {
        Self {
            cities: BTreeSet::new(),
            ..self.clone()
        }
    }
}

/// Labels the search form sends for "no restriction".
const ALL_LABELS: &[&str] = &["all", "tous", "toutes"];

fn choice<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| {
        let lowered = value.trim().to_lowercase();
        !lowered.is_empty() && !ALL_LABELS.contains(&lowered.as_str())
    }))
}

fn status_choice<'de, D>(deserializer: D) -> Result<Option<ListingStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    choice(deserializer)?
        .map(|raw| {
            ListingStatus::parse(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown listing status '{raw}'")))
        })
        .transpose()
}

fn type_choice<'de, D>(deserializer: D) -> Result<Option<PropertyType>, D::Error>
where
    D: Deserializer<'de>,
{
    choice(deserializer)?
        .map(|raw| {
            PropertyType::parse(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown property type '{raw}'")))
        })
        .transpose()
}

fn positive_budget<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u64>::deserialize(deserializer)?;
    Ok(FilterCriteria::default().with_max_budget(raw).max_budget)
}

fn positive_surface<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(FilterCriteria::default().with_min_surface(raw).min_surface)
}

fn feature_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(FilterCriteria::default().with_features(raw).features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_has_no_restrictions() {
        let criteria = FilterCriteria::default();
        assert!(criteria.cities.is_empty());
        assert!(!criteria.has_soft_criteria());
    }

    #[test]
    fn deserialized_criteria_drop_empty_numeric_fields() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "max_budget": 0,
            "min_surface": 0.0,
            "features": ["  ", "Jardin", "Jardin"],
        }))
        .expect("criteria parse");

        assert_eq!(criteria.max_budget, None);
        assert_eq!(criteria.min_surface, None);
        assert_eq!(criteria.features, vec!["Jardin".to_string()]);
        assert_eq!(
            criteria,
            FilterCriteria::default()
                .with_max_budget(Some(0))
                .with_min_surface(Some(0.0))
                .with_features(["Jardin"])
        );
    }

    #[test]
    fn setters_return_updated_copies() {
        let base = FilterCriteria::default().with_max_budget(Some(350_000));
        let narrowed = base.clone().with_cities(["Boulange"]);

        assert!(base.cities.is_empty());
        assert!(narrowed.cities.contains("Boulange"));
        assert_eq!(narrowed.max_budget, Some(350_000));
    }

    #[test]
    fn blank_numeric_inputs_stay_unset() {
        let criteria = FilterCriteria::default()
            .with_max_budget(Some(0))
            .with_min_surface(Some(f64::NAN));
        assert_eq!(criteria.max_budget, None);
        assert_eq!(criteria.min_surface, None);
        assert!(!criteria.has_soft_criteria());
    }

    #[test]
    fn toggle_feature_preserves_request_order() {
        let criteria = FilterCriteria::default()
            .toggle_feature("Garage")
            .toggle_feature("Jardin")
            .toggle_feature(NO_WORK_NEEDED)
            .toggle_feature("Jardin");

        assert_eq!(criteria.features, vec!["Garage", NO_WORK_NEEDED]);
        assert!(criteria.has_soft_criteria());
    }

    #[test]
    fn deserializes_all_labels_as_unrestricted() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "status": "Tous",
            "type": "Maison",
            "cities": [],
            "max_budget": 350000,
        }))
        .expect("criteria parse");

        assert_eq!(criteria.status, None);
        assert_eq!(criteria.property_type, Some(PropertyType::House));
        assert_eq!(criteria.max_budget, Some(350_000));

        let round_trip: FilterCriteria =
            serde_json::from_value(serde_json::to_value(&criteria).expect("serializes"))
                .expect("parses back");
        assert_eq!(round_trip, criteria);
    }

    #[test]
    fn rejects_unknown_type_labels() {
        let err = serde_json::from_value::<FilterCriteria>(serde_json::json!({ "type": "Castle" }))
            .expect_err("unknown type");
        assert!(err.to_string().contains("Castle"));
    }

    #[test]
    fn reset_clears_everything() {
        let criteria = FilterCriteria::default()
            .with_status(Some(ListingStatus::Rental))
            .with_min_rooms(Some(2))
            .reset();
        assert_eq!(criteria, FilterCriteria::default());
    }
}
