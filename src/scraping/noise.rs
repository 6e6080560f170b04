//! Noise filter
//!
//! Separates genuine record fragments from template chrome (ads, cookie
//! banners, footers, navigation prompts). Every source runs its candidates
//! through the same `NoiseFilter` so the rules stay identical across sites.

use crate::config::NoiseConfig;

/// Classifies normalized fragments as garbage or record data
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    /// Lowercased boilerplate terms
    terms: Vec<String>,
    min_length: usize,
    numeric_min_length: usize,
}

impl NoiseFilter {
    pub fn new(config: &NoiseConfig) -> Self {
        Self {
            terms: config
                .terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            min_length: config.min_length,
            numeric_min_length: config.numeric_min_length,
        }
    }

    /// Returns true when the fragment should be discarded.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn is_garbage(&self, text: &str) -> bool {
        let len = text.chars().count();
        if len < self.min_length {
            return true;
        }

        if len < self.numeric_min_length && is_numeric_noise(text) {
            return true;
        }

        let lower = text.to_lowercase();
        self.terms.iter().any(|term| lower.contains(term.as_str()))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(&NoiseConfig::default())
    }
}

/// Only digits, punctuation, and whitespace
fn is_numeric_noise(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_punctuation() || c.is_whitespace())
}
