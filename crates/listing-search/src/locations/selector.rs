use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::sectors::SectorDirectory;
use crate::search::FilterCriteria;

/// Per-city match counts supplied by the caller.
///
/// `Loading` means counts are not known yet; every city is then treated as eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityCounts {
    Loading,
    Known(BTreeMap<String, usize>),
}

impl CityCounts {
    pub fn count(&self, city: &str) -> Option<usize> {
        match self {
            CityCounts::Loading => None,
            CityCounts::Known(counts) => Some(counts.get(city).copied().unwrap_or(0)),
        }
    }

    fn is_eligible(&self, city: &str) -> bool {
        self.count(city).map_or(true, |count| count > 0)
    }
}

impl From<BTreeMap<String, usize>> for CityCounts {
    fn from(counts: BTreeMap<String, usize>) -> Self {
        Self::Known(counts)
    }
}

/// Multi-select city state grouped into sectors.
///
/// An empty selection means "all cities" and is distinct from selecting every known city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelector {
    selected: BTreeSet<String>,
}

impl LocationSelector {
    pub fn new<I, S>(selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn toggle_city(&mut self, city: &str) {
        if !self.selected.remove(city) {
            self.selected.insert(city.to_string());
        }
    }

    /// Select every eligible city of `sector`, or deselect them when all already are.
    ///
    /// Cities outside the eligible subset are left untouched.
    pub fn toggle_sector(&mut self, sector: &str, directory: &SectorDirectory, counts: &CityCounts) {
        let eligible = eligible_cities(sector, directory, counts);
        if eligible.is_empty() {
            return;
        }

        if eligible.iter().all(|city| self.selected.contains(*city)) {
            for city in eligible {
                self.selected.remove(city);
            }
        } else {
            self.selected
                .extend(eligible.into_iter().map(str::to_string));
        }
    }

    /// Clear the selection, which reads as "all cities".
    pub fn select_all(&mut self) {
        self.selected.clear();
    }

    pub fn is_sector_fully_selected(
        &self,
        sector: &str,
        directory: &SectorDirectory,
        counts: &CityCounts,
    ) -> bool {
        let eligible = eligible_cities(sector, directory, counts);
        !eligible.is_empty() && eligible.iter().all(|city| self.selected.contains(*city))
    }

    /// Build the per-sector option list shown by the selector.
    ///
    /// Cities with no match are disabled unless already selected, so a stale selection can
    /// still be cleared.
    pub fn options(&self, directory: &SectorDirectory, counts: &CityCounts) -> Vec<SectorOptions> {
        directory
            .groups()
            .iter()
            .map(|group| SectorOptions {
                sector: group.name.clone(),
                fully_selected: self.is_sector_fully_selected(&group.name, directory, counts),
                cities: group
                    .cities
                    .iter()
                    .map(|city| {
                        let selected = self.selected.contains(city);
                        let count = counts.count(city);
                        CityOption {
                            name: city.clone(),
                            count,
                            selected,
                            disabled: count == Some(0) && !selected,
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Apply the selection to `base` through its pure setter.
    pub fn criteria(&self, base: FilterCriteria) -> FilterCriteria {
        base.with_cities(self.selected.iter().cloned())
    }
}

fn eligible_cities<'d>(
    sector: &str,
    directory: &'d SectorDirectory,
    counts: &CityCounts,
) -> Vec<&'d str> {
    directory
        .cities_in(sector)
        .iter()
        .map(String::as_str)
        .filter(|city| counts.is_eligible(city))
        .collect()
}

/// Sector heading plus its city rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorOptions {
    pub sector: String,
    pub fully_selected: bool,
    pub cities: Vec<CityOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub selected: bool,
    pub disabled: bool,
}
