//! Property search: hard filters, soft scoring, and best-match ranking.

mod criteria;
mod renovation;
mod scoring;

pub use criteria::{FilterCriteria, NO_WORK_NEEDED};
pub use renovation::{KeywordRenovationPolicy, RenovationSignal, DEFAULT_RENOVATION_KEYWORDS};
pub use scoring::ScoringWeights;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Property;

/// A surviving property annotated with its match quality.
///
/// `match_score` is `None` when no soft criterion is active; the property then counts as a
/// full match and keeps its upstream position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    #[serde(flatten)]
    pub property: &'a Property,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_criteria: Vec<String>,
}

impl ScoredResult<'_> {
    pub fn effective_score(&self) -> u8 {
        self.match_score.unwrap_or(scoring::FULL_SCORE)
    }
}

/// Stateless evaluator combining the scoring weights with a renovation policy.
#[derive(Clone)]
pub struct SearchEngine {
    weights: ScoringWeights,
    renovation: Arc<dyn RenovationSignal>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(
            ScoringWeights::default(),
            Arc::new(KeywordRenovationPolicy::default()),
        )
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl SearchEngine {
    pub fn new(weights: ScoringWeights, renovation: Arc<dyn RenovationSignal>) -> Self {
        Self {
            weights,
            renovation,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Filter, score, and rank `properties` against `criteria`.
    ///
    /// Properties failing a hard filter never appear in the output. Without soft criteria the
    /// survivors come back in input order; otherwise they are sorted by descending score and
    /// ties keep their input order.
    pub fn evaluate<'a>(
        &self,
        properties: &'a [Property],
        criteria: &FilterCriteria,
    ) -> Vec<ScoredResult<'a>> {
        let survivors = properties
            .iter()
            .filter(|property| passes_hard_filters(property, criteria));

        if !criteria.has_soft_criteria() {
            return survivors
                .map(|property| ScoredResult {
                    property,
                    match_score: None,
                    missing_criteria: Vec::new(),
                })
                .collect();
        }

        let mut results: Vec<ScoredResult<'a>> = survivors
            .map(|property| {
                let outcome = scoring::score_property(
                    property,
                    criteria,
                    &self.weights,
                    self.renovation.as_ref(),
                );
                ScoredResult {
                    property,
                    match_score: Some(outcome.score),
                    missing_criteria: outcome.missing,
                }
            })
            .collect();

        // `sort_by` is stable, so equal scores keep their input order.
        results.sort_by(|a, b| b.effective_score().cmp(&a.effective_score()));
        results
    }

    /// Number of properties per city that match every active hard filter except the city one.
    pub fn city_counts(
        &self,
        properties: &[Property],
        criteria: &FilterCriteria,
    ) -> BTreeMap<String, usize> {
        let unrestricted = criteria.without_cities();
        let mut counts = BTreeMap::new();
        for property in properties
            .iter()
            .filter(|property| passes_hard_filters(property, &unrestricted))
        {
            *counts.entry(property.city.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Evaluate with the default weights and keyword policy.
pub fn evaluate<'a>(properties: &'a [Property], criteria: &FilterCriteria) -> Vec<ScoredResult<'a>> {
    SearchEngine::default().evaluate(properties, criteria)
}

pub(crate) fn passes_hard_filters(property: &Property, criteria: &FilterCriteria) -> bool {
    let status_match = criteria
        .status
        .map_or(true, |status| status == property.status_or_default());
    let type_match = criteria
        .property_type
        .map_or(true, |wanted| property.property_type == Some(wanted));
    let city_match = criteria.cities.is_empty() || criteria.cities.contains(&property.city);
    let budget_match = criteria
        .max_budget
        .map_or(true, |budget| property.price_or_zero() <= budget);

    status_match && type_match && city_match && budget_match
}
