//! Generic HTML-scraping adapter driven by a per-site profile

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use super::{SourceAdapter, SourceError};
use crate::scraping::{
    ExtractionPlan, FetchError, FetchedPage, ItemExtractor, NoiseFilter, SelectorError,
    SiteRequest, Transport,
};
use crate::types::{Category, SourceResult};
use crate::util::mask_dni;

/// Request and extraction shape of one site
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Configuration key, e.g. "datuar"
    pub key: &'static str,
    /// Label reported in results
    pub name: &'static str,
    pub category: Category,
    pub default_base_url: &'static str,
    pub selectors: &'static [&'static str],
    pub max_items: usize,
    pub sort_by_length: bool,
    /// Build the site request for a validated DNI
    pub build_request: fn(&Url, &str) -> Result<SiteRequest, url::ParseError>,
}

/// Adapter that fetches one page and extracts items with CSS selectors
pub struct HtmlSource {
    profile: SiteProfile,
    base_url: Url,
    transport: Arc<dyn Transport>,
    extractor: ItemExtractor,
    timeout: Duration,
}

impl HtmlSource {
    pub fn new(
        profile: SiteProfile,
        base_url: Url,
        transport: Arc<dyn Transport>,
        filter: NoiseFilter,
        timeout: Duration,
    ) -> Result<Self, SelectorError> {
        let plan = ExtractionPlan::new(profile.selectors)?
            .with_max_items(profile.max_items)
            .sorted_by_length(profile.sort_by_length);

        Ok(Self {
            profile,
            base_url,
            transport,
            extractor: ItemExtractor::new(plan, filter),
            timeout,
        })
    }

    /// Apply configured cap/sort overrides on top of the profile defaults
    pub fn with_overrides(mut self, max_items: Option<usize>, sort_by_length: Option<bool>) -> Self {
        let mut plan = self.extractor.plan().clone();
        if let Some(max) = max_items {
            plan = plan.with_max_items(max);
        }
        if let Some(sort) = sort_by_length {
            plan = plan.sorted_by_length(sort);
        }
        self.extractor = ItemExtractor::new(plan, self.extractor.filter().clone());
        self
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch_page(&self, dni: &str) -> Result<FetchedPage, SourceError> {
        let request = (self.profile.build_request)(&self.base_url, dni)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        match tokio::time::timeout(self.timeout, self.transport.send(&request)).await {
            Err(_) => Err(SourceError::Timeout(self.timeout)),
            Ok(Err(FetchError::Timeout(limit))) => Err(SourceError::Timeout(limit)),
            Ok(Err(e)) => Err(SourceError::Transport(e)),
            Ok(Ok(page)) => Ok(page),
        }
    }
}

#[async_trait]
impl SourceAdapter for HtmlSource {
    fn name(&self) -> &str {
        self.profile.name
    }

    fn category(&self) -> Option<Category> {
        Some(self.profile.category)
    }

    async fn fetch_source(&self, dni: &str) -> SourceResult {
        let start = Instant::now();
        let name = self.profile.name;
        let category = self.category();

        let outcome = match self.fetch_page(dni).await {
            Ok(page) => {
                let items = self.extractor.extract(&page.body);
                debug!(
                    "{}: {} items for {} ({} bytes, HTTP {})",
                    name,
                    items.len(),
                    mask_dni(dni),
                    page.body.len(),
                    page.status_code
                );
                if items.is_empty() {
                    Err((SourceError::Empty, Some(page.status_code)))
                } else {
                    Ok((items, page.status_code))
                }
            }
            Err(e) => Err((e, None)),
        };

        let elapsed_ms = start.elapsed().as_millis().to_string();
        match outcome {
            Ok((items, status)) => {
                let empty_message = SourceError::Empty.message(name);
                SourceResult::from_items(name, category, items, empty_message)
                    .with_metadata("elapsedMs", elapsed_ms)
                    .with_metadata("httpStatus", status.to_string())
            }
            Err((e, status)) => {
                warn!("{} failed for {}: {}", name, mask_dni(dni), e);
                let result = e.into_result(name, category).with_metadata("elapsedMs", elapsed_ms);
                match status {
                    Some(code) => result.with_metadata("httpStatus", code.to_string()),
                    None => result,
                }
            }
        }
    }
}
