//! # Filter Pipeline
//!
//! Narrows the in-memory country list down to what the user asked for. Three
//! independent dimensions are combined with AND:
//!
//! | Dimension | Matches when | Case |
//! |-----------|--------------|------|
//! | `search_term` | substring of common name, official name, or any capital | insensitive |
//! | `region` | equals the country's region | sensitive |
//! | `language` | equals one of the country's language names | insensitive |
//!
//! An empty dimension is no constraint. Filtering is pure and keeps the input
//! order, so it is safe to run again on every change of [`FilterState`]. When
//! to run it (debouncing keystrokes) is the caller's business; see
//! [`crate::debounce`].

use crate::model::{Country, LanguageProjection};
use std::collections::BTreeSet;

/// Regions offered for the region filter.
pub const REGIONS: [&str; 5] = ["Africa", "Americas", "Asia", "Europe", "Oceania"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub region: String,
    pub language: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// True when no dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.region.is_empty() && self.language.is_empty()
    }

    pub fn matches(&self, country: &Country) -> bool {
        matches_search(country, &self.search_term)
            && matches_region(country, &self.region)
            && matches_language(country, &self.language)
    }
}

/// Countries satisfying every active dimension of `filter`, in input order.
pub fn filter_countries<'a>(countries: &'a [Country], filter: &FilterState) -> Vec<&'a Country> {
    countries.iter().filter(|c| filter.matches(c)).collect()
}

fn matches_search(country: &Country, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&needle);

    contains(country.name.common.as_str())
        || country.name.official.as_deref().is_some_and(contains)
        || country
            .capital
            .iter()
            .flatten()
            .any(|capital| contains(capital.as_str()))
}

fn matches_region(country: &Country, region: &str) -> bool {
    region.is_empty() || country.region == region
}

fn matches_language(country: &Country, language: &str) -> bool {
    if language.is_empty() {
        return true;
    }
    let wanted = language.to_lowercase();
    country
        .language_names()
        .any(|name| name.to_lowercase() == wanted)
}

/// Distinct language names across `projections`, sorted.
pub fn collect_languages<'a, I>(projections: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a LanguageProjection>,
{
    let names: BTreeSet<&str> = projections
        .into_iter()
        .flat_map(|p| p.languages.iter().flat_map(|langs| langs.values()))
        .map(String::as_str)
        .collect();
    names.into_iter().map(str::to_string).collect()
}
