//! Selector-driven item extraction
//!
//! Turns an HTML page into the ordered, distinct list of record fragments
//! a source reports: selector matches → normalize → noise filter → dedupe
//! (first occurrence wins) → cap → optional length sort.

use scraper::{Html, Selector};
use std::collections::HashSet;
use thiserror::Error;

use super::noise::NoiseFilter;
use super::normalize::normalize_text;

#[derive(Debug, Error)]
#[error("Invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// What to pull out of a page and how to shape it
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    selectors: Vec<Selector>,
    /// Keep at most this many items
    pub max_items: Option<usize>,
    /// Longest fragments first
    pub sort_by_length: bool,
}

impl ExtractionPlan {
    /// Parse CSS selectors up front so a bad one fails at startup
    pub fn new(selectors: &[&str]) -> Result<Self, SelectorError> {
        let selectors = selectors
            .iter()
            .map(|s| {
                Selector::parse(s).map_err(|e| SelectorError {
                    selector: s.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            selectors,
            max_items: None,
            sort_by_length: false,
        })
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn sorted_by_length(mut self, sort: bool) -> Self {
        self.sort_by_length = sort;
        self
    }
}

/// Applies an `ExtractionPlan` with a shared `NoiseFilter`
#[derive(Debug, Clone)]
pub struct ItemExtractor {
    plan: ExtractionPlan,
    filter: NoiseFilter,
}

impl ItemExtractor {
    pub fn new(plan: ExtractionPlan, filter: NoiseFilter) -> Self {
        Self { plan, filter }
    }

    pub fn plan(&self) -> &ExtractionPlan {
        &self.plan
    }

    pub fn filter(&self) -> &NoiseFilter {
        &self.filter
    }

    /// Extract the final item list from an HTML document
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let candidates = self.plan.selectors.iter().flat_map(|selector| {
            document
                .select(selector)
                .map(|element| element.text().collect::<String>())
        });

        self.clean(candidates)
    }

    /// Normalize, filter, dedupe, cap and order raw candidates
    pub fn clean<I, S>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut items: Vec<String> = candidates
            .into_iter()
            .map(|raw| normalize_text(raw.as_ref()))
            .filter(|text| !self.filter.is_garbage(text))
            .filter(|text| seen.insert(text.clone()))
            .collect();

        if let Some(max) = self.plan.max_items {
            items.truncate(max);
        }

        if self.plan.sort_by_length {
            // Stable: equal lengths keep document order
            items.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        }

        items
    }
}
