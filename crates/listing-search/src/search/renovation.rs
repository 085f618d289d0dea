//! Classification of listings that need no renovation work.
//!
//! The check is a keyword policy over free text. It sits behind [`RenovationSignal`] so the
//! phrase list can be configured, replaced, or tested without touching the scoring loop.

use crate::catalog::Property;

/// Phrases that indicate a listing is move-in ready.
pub const DEFAULT_RENOVATION_KEYWORDS: &[&str] = &[
    "renovated",
    "no work needed",
    "new",
    "impeccable",
    "redone",
    "excellent condition",
    "rénové",
    "renove",
    "aucun travaux",
    "sans travaux",
    "neuf",
    "refait",
    "excellent état",
    "parfait état",
];

/// Decides whether a property satisfies the synthetic "no work needed" request.
///
/// Implementations must be pure: the same property always yields the same answer.
pub trait RenovationSignal: Send + Sync {
    fn needs_no_work(&self, property: &Property) -> bool;
}

/// Case-insensitive search for any trigger phrase across description, catch phrase,
/// and feature tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRenovationPolicy {
    keywords: Vec<String>,
}

impl KeywordRenovationPolicy {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordRenovationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RENOVATION_KEYWORDS)
    }
}

impl RenovationSignal for KeywordRenovationPolicy {
    fn needs_no_work(&self, property: &Property) -> bool {
        let haystack = format!(
            "{} {} {}",
            property.description,
            property.catch_phrase,
            property.features.join(" ")
        )
        .to_lowercase();

        self.keywords
            .iter()
            .any(|keyword| haystack.contains(keyword.as_str()))
    }
}
