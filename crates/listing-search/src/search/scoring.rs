use serde::{Deserialize, Serialize};

use super::criteria::{FilterCriteria, NO_WORK_NEEDED};
use super::renovation::RenovationSignal;
use crate::catalog::Property;

/// Penalty weights applied per unmet soft criterion.
///
/// The defaults are business heuristics carried over from the live site, not a fitted
/// model. Tune them through configuration rather than editing the scoring loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub surface_penalty: u8,
    pub rooms_penalty: u8,
    pub feature_penalty: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            surface_penalty: 20,
            rooms_penalty: 20,
            feature_penalty: 10,
        }
    }
}

pub(crate) const FULL_SCORE: u8 = 100;

pub(crate) struct SoftScore {
    pub score: u8,
    pub missing: Vec<String>,
}

pub(crate) fn score_property(
    property: &Property,
    criteria: &FilterCriteria,
    weights: &ScoringWeights,
    renovation: &dyn RenovationSignal,
) -> SoftScore {
    let mut score = i32::from(FULL_SCORE);
    let mut missing = Vec::new();

    if let Some(min_surface) = criteria.min_surface {
        if property.surface_or_zero() < min_surface {
            score -= i32::from(weights.surface_penalty);
            missing.push(format!("Surface < {}m²", format_number(min_surface)));
        }
    }

    if let Some(min_rooms) = criteria.min_rooms {
        if room_count(property) < min_rooms {
            score -= i32::from(weights.rooms_penalty);
            missing.push(format!("< {min_rooms} rooms"));
        }
    }

    for feature in &criteria.features {
        if feature == NO_WORK_NEEDED {
            if !renovation.needs_no_work(property) {
                score -= i32::from(weights.feature_penalty);
                missing.push("Renovation needed".to_string());
            }
        } else if !has_feature(property, feature) {
            score -= i32::from(weights.feature_penalty);
            missing.push(format!("Missing {feature}"));
        }
    }

    SoftScore {
        score: score.clamp(0, i32::from(FULL_SCORE)) as u8,
        missing,
    }
}

/// Explicit bedroom count, else the first count found in the feature tags, else zero.
pub(crate) fn room_count(property: &Property) -> u32 {
    property.rooms.unwrap_or_else(|| {
        property
            .features
            .iter()
            .find_map(|feature| bedroom_count_in(feature))
            .unwrap_or(0)
    })
}

/// Reads tags such as "4 Chambres", "3 bedrooms", or "2 ch.".
fn bedroom_count_in(tag: &str) -> Option<u32> {
    let lowered = tag.to_lowercase();
    let mut words = lowered.split_whitespace().peekable();

    while let Some(word) = words.next() {
        let Ok(count) = word.parse::<u32>() else {
            continue;
        };
        if let Some(next) = words.peek() {
            if next.starts_with("chambre")
                || next.starts_with("bedroom")
                || next.trim_end_matches('.') == "ch"
            {
                return Some(count);
            }
        }
    }

    None
}

fn has_feature(property: &Property, requested: &str) -> bool {
    let requested = requested.trim().to_lowercase();
    if requested.is_empty() {
        return true;
    }

    property
        .features
        .iter()
        .any(|feature| feature.to_lowercase().contains(&requested))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
