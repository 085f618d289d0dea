use clap::Args;
use listing_search::catalog::{
    sample_cities, sample_properties, City, ListingStatus, Property, PropertyCsvImporter,
    PropertyType,
};
use listing_search::config::{AppConfig, SearchConfig};
use listing_search::error::AppError;
use listing_search::locations::{CityCounts, LocationSelector, SectorDirectory};
use listing_search::search::{
    FilterCriteria, KeywordRenovationPolicy, ScoredResult, SearchEngine, NO_WORK_NEEDED,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// CSV export to search instead of the built-in sample listings
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Transaction kind: sale or rental (vente / location)
    #[arg(long, value_parser = crate::infra::parse_status)]
    pub(crate) status: Option<ListingStatus>,
    /// Property type: house, apartment, land, building, commercial
    #[arg(long = "type", value_parser = crate::infra::parse_property_type)]
    pub(crate) property_type: Option<PropertyType>,
    /// Restrict to a city; repeat for several. Omit for every city.
    #[arg(long = "city")]
    pub(crate) cities: Vec<String>,
    /// Maximum price in euros
    #[arg(long)]
    pub(crate) max_budget: Option<u64>,
    /// Desired minimum surface in square meters
    #[arg(long)]
    pub(crate) min_surface: Option<f64>,
    /// Desired minimum number of rooms
    #[arg(long)]
    pub(crate) min_rooms: Option<u32>,
    /// Desired feature tag; repeat for several
    #[arg(long = "feature")]
    pub(crate) features: Vec<String>,
    /// Prefer listings that need no renovation work
    #[arg(long)]
    pub(crate) no_work_needed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SectorsArgs {
    /// CSV export used to count listings per city
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Mark these cities as selected in the output; repeat for several
    #[arg(long = "select")]
    pub(crate) selected: Vec<String>,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (catalog, origin) = load_catalog(args.csv.as_deref())?;
    let engine = engine_for(&config.search);
    let criteria = criteria_from(&args);

    println!("Property search ({origin}, {} listings)", catalog.len());
    println!("Filters: {}", describe_criteria(&criteria));

    let results = engine.evaluate(&catalog, &criteria);
    for line in render_results(&results) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_sectors(args: SectorsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (catalog, origin) = load_catalog(args.csv.as_deref())?;
    let engine = engine_for(&config.search);

    let directory = SectorDirectory::group_by_sector(
        &cities_for(&catalog),
        config.search.sector_order.as_slice(),
    );
    let counts = CityCounts::from(engine.city_counts(&catalog, &FilterCriteria::default()));
    let selector = LocationSelector::new(args.selected);

    println!("Sectors ({origin})");
    for line in render_sectors(&directory, &counts, &selector) {
        println!("{line}");
    }
    Ok(())
}

fn load_catalog(csv: Option<&Path>) -> Result<(Vec<Property>, String), AppError> {
    match csv {
        Some(path) => {
            let catalog = PropertyCsvImporter::from_path(path)?;
            Ok((catalog, format!("imported from {}", path.display())))
        }
        None => Ok((sample_properties(), "sample catalog".to_string())),
    }
}

fn engine_for(config: &SearchConfig) -> SearchEngine {
    SearchEngine::new(
        config.weights,
        Arc::new(KeywordRenovationPolicy::new(&config.renovation_keywords)),
    )
}

/// Reference cities plus any catalog city missing from them, which lands in the fallback sector.
fn cities_for(catalog: &[Property]) -> Vec<City> {
    let mut cities = sample_cities();
    for property in catalog {
        let name = property.city.trim();
        if !name.is_empty() && !cities.iter().any(|city| city.name == name) {
            cities.push(City {
                name: name.to_string(),
                sector: None,
            });
        }
    }
    cities
}

pub(crate) fn criteria_from(args: &SearchArgs) -> FilterCriteria {
    let mut features = args.features.clone();
    if args.no_work_needed {
        features.push(NO_WORK_NEEDED.to_string());
    }

    FilterCriteria::default()
        .with_status(args.status)
        .with_type(args.property_type)
        .with_cities(args.cities.iter().cloned())
        .with_max_budget(args.max_budget)
        .with_min_surface(args.min_surface)
        .with_min_rooms(args.min_rooms)
        .with_features(features)
}

fn describe_criteria(criteria: &FilterCriteria) -> String {
    let mut parts = vec![
        format!(
            "status={}",
            criteria.status.map_or("all", ListingStatus::label)
        ),
        format!(
            "type={}",
            criteria.property_type.map_or("all", PropertyType::label)
        ),
    ];

    if criteria.cities.is_empty() {
        parts.push("cities=all".to_string());
    } else {
        let cities: Vec<&str> = criteria.cities.iter().map(String::as_str).collect();
        parts.push(format!("cities={}", cities.join(", ")));
    }
    if let Some(budget) = criteria.max_budget {
        parts.push(format!("max budget={budget} €"));
    }
    if let Some(surface) = criteria.min_surface {
        parts.push(format!("min surface={surface} m²"));
    }
    if let Some(rooms) = criteria.min_rooms {
        parts.push(format!("min rooms={rooms}"));
    }
    if !criteria.features.is_empty() {
        parts.push(format!("features={}", criteria.features.join(", ")));
    }

    parts.join(" | ")
}

pub(crate) fn render_results(results: &[ScoredResult<'_>]) -> Vec<String> {
    if results.is_empty() {
        return vec!["No listing matches these filters.".to_string()];
    }

    let mut lines = vec![format!("{} match(es)", results.len())];
    for (rank, result) in results.iter().enumerate() {
        let property = result.property;
        let score = result
            .match_score
            .map_or_else(|| "  --".to_string(), |score| format!("{score:>3}%"));
        lines.push(format!(
            "{:>2}. [{score}] {} - {} - {} € - {} m²",
            rank + 1,
            property.title,
            property.city,
            property.price_or_zero(),
            property.surface_or_zero()
        ));
        if !result.missing_criteria.is_empty() {
            lines.push(format!(
                "      missing: {}",
                result.missing_criteria.join(", ")
            ));
        }
    }
    lines
}

pub(crate) fn render_sectors(
    directory: &SectorDirectory,
    counts: &CityCounts,
    selector: &LocationSelector,
) -> Vec<String> {
    let mut lines = Vec::new();
    for sector in selector.options(directory, counts) {
        let marker = if sector.fully_selected { "[x]" } else { "[ ]" };
        lines.push(format!("{marker} {}", sector.sector));
        for city in sector.cities {
            let marker = match (city.selected, city.disabled) {
                (true, _) => "[x]",
                (false, true) => " - ",
                (false, false) => "[ ]",
            };
            let count = city.count.map(|n| format!(" ({n})")).unwrap_or_default();
            lines.push(format!("    {marker} {}{count}", city.name));
        }
    }
    lines
}
