use serde::Serialize;

use crate::catalog::City;

/// Sector label used for cities stored without one.
pub const FALLBACK_SECTOR: &str = "Autres";

/// Display order the agency prefers for its home sectors.
pub const DEFAULT_SECTOR_ORDER: &[&str] = &[
    "Bassin de Longwy & Frontières",
    "Cœur de Secteur (Pays-Haut)",
    "Secteur Longuyon & Environs",
    "Secteur Boulange / Audun",
];

/// Cities sharing a sector, in reference-data order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorGroup {
    pub name: String,
    pub cities: Vec<String>,
}

/// Ordered sector groups feeding the location selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectorDirectory {
    groups: Vec<SectorGroup>,
}

impl SectorDirectory {
    /// Group `cities` by sector. Sectors named in `preferred_order` come first in that order,
    /// the rest follow alphabetically. Duplicate city names keep their first sector.
    pub fn group_by_sector<S: AsRef<str>>(cities: &[City], preferred_order: &[S]) -> Self {
        let mut groups: Vec<SectorGroup> = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for city in cities {
            let name = city.name.trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }

            let sector = city
                .sector
                .as_deref()
                .map(str::trim)
                .filter(|sector| !sector.is_empty())
                .unwrap_or(FALLBACK_SECTOR);

            match groups.iter_mut().find(|group| group.name == sector) {
                Some(group) => group.cities.push(name.to_string()),
                None => groups.push(SectorGroup {
                    name: sector.to_string(),
                    cities: vec![name.to_string()],
                }),
            }
        }

        let rank = |name: &str| {
            preferred_order
                .iter()
                .position(|preferred| preferred.as_ref() == name)
        };
        groups.sort_by(|a, b| match (rank(a.name.as_str()), rank(b.name.as_str())) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });

        Self { groups }
    }

    pub fn groups(&self) -> &[SectorGroup] {
        &self.groups
    }

    pub fn cities_in(&self, sector: &str) -> &[String] {
        self.groups
            .iter()
            .find(|group| group.name == sector)
            .map(|group| group.cities.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_sectors_lead_then_alphabetical() {
        let cities = vec![
            City::new("Hayange", "Vallée de la Fensch"),
            City::new("Boulange", "Secteur Boulange / Audun"),
            City::new("Longwy", "Bassin de Longwy & Frontières"),
            City::new("Briey", "Bassin de Briey"),
        ];

        let directory = SectorDirectory::group_by_sector(&cities, DEFAULT_SECTOR_ORDER);
        let names: Vec<&str> = directory
            .groups()
            .iter()
            .map(|group| group.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "Bassin de Longwy & Frontières",
                "Secteur Boulange / Audun",
                "Bassin de Briey",
                "Vallée de la Fensch",
            ]
        );
    }

    #[test]
    fn cities_without_sector_land_in_fallback_group() {
        let cities = vec![
            City {
                name: "Tucquegnieux".to_string(),
                sector: None,
            },
            City {
                name: "Fillières".to_string(),
                sector: Some("  ".to_string()),
            },
        ];

        let directory = SectorDirectory::group_by_sector(&cities, DEFAULT_SECTOR_ORDER);

        assert_eq!(
            directory.cities_in(FALLBACK_SECTOR),
            ["Tucquegnieux".to_string(), "Fillières".to_string()]
        );
    }

    #[test]
    fn duplicate_city_names_are_grouped_once() {
        let cities = vec![City::new("Audun", "A"), City::new("Audun", "B")];
        let directory = SectorDirectory::group_by_sector::<&str>(&cities, &[]);
        assert_eq!(directory.groups().len(), 1);
        assert!(directory.cities_in("B").is_empty());
    }
}
