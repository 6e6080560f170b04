//! Fetching and extraction primitives shared by every source
//!
//! Key components:
//! - `normalize_text`: cleans a raw text fragment
//! - `NoiseFilter`: rejects template chrome and bare numeric noise
//! - `FetchEngine`: reqwest transport behind the `Transport` trait
//! - `ItemExtractor`: selector queries plus the clean/dedupe/cap/sort pipeline

pub mod extractor;
pub mod fetcher;
pub mod noise;
pub mod normalize;

pub use extractor::{ExtractionPlan, ItemExtractor, SelectorError};
pub use fetcher::{FetchConfig, FetchEngine, FetchError, FetchedPage, Method, SiteRequest, Transport};
pub use noise::NoiseFilter;
pub use normalize::normalize_text;
