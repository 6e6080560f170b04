//! Source adapters
//!
//! One adapter per external site. Every adapter implements `SourceAdapter`
//! and turns any failure into an error `SourceResult`, so a misbehaving
//! site never aborts the lookup. Sites are registered in a fixed order:
//! Datuar, CuitOnline, Dateas.

pub mod cuitonline;
pub mod dateas;
pub mod datuar;
mod html;

pub use html::{HtmlSource, SiteProfile};

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::scraping::{FetchError, NoiseFilter, Transport};
use crate::types::{Category, SourceResult};

/// Fetch-and-extract contract for one external site
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable label of the site
    fn name(&self) -> &str;

    fn category(&self) -> Option<Category> {
        None
    }

    /// Query the site for `dni`. Never fails; failures become error results.
    async fn fetch_source(&self, dni: &str) -> SourceResult;
}

/// Why a source produced no data
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Transport(#[from] FetchError),
    #[error("no qualifying items")]
    Empty,
}

impl SourceError {
    /// User-facing explanation, distinct per failure cause
    pub fn message(&self, source_name: &str) -> String {
        match self {
            Self::Timeout(limit) => format!(
                "{} no respondió dentro de {}.",
                source_name,
                format_seconds(*limit)
            ),
            Self::Transport(FetchError::ContentTooLarge(_)) => format!(
                "{} devolvió una respuesta demasiado grande.",
                source_name
            ),
            Self::Transport(e) => match e.status() {
                Some(code) => format!("{} respondió con estado HTTP {}.", source_name, code),
                None => format!("No se pudo conectar con {}.", source_name),
            },
            Self::Empty => format!("No se encontraron registros en {}.", source_name),
        }
    }

    /// Convert into the error result reported for this source
    pub fn into_result(self, source_name: &str, category: Option<Category>) -> SourceResult {
        let result = SourceResult::error(source_name, category, self.message(source_name));
        match self.status() {
            Some(code) => result.with_metadata("httpStatus", code.to_string()),
            None => result,
        }
    }

    fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// "1 segundo", "8 segundos", "0.3 segundos"
fn format_seconds(d: Duration) -> String {
    if d.subsec_millis() != 0 {
        format!("{:.1} segundos", d.as_secs_f64())
    } else if d.as_secs() == 1 {
        "1 segundo".to_string()
    } else {
        format!("{} segundos", d.as_secs())
    }
}

/// Built-in site profiles in registration order
pub fn profiles() -> Vec<SiteProfile> {
    vec![datuar::profile(), cuitonline::profile(), dateas::profile()]
}

/// Build the enabled adapters, in registration order, sharing one transport
pub fn build_registry(
    config: &Config,
    transport: Arc<dyn Transport>,
) -> Result<Vec<Arc<dyn SourceAdapter>>> {
    let filter = NoiseFilter::new(&config.noise);
    let timeout = Duration::from_secs(config.sources.timeout_secs);
    let mut adapters: Vec<Arc<dyn SourceAdapter>> = Vec::new();

    for (profile, (key, site)) in profiles().into_iter().zip(config.sources.sites()) {
        debug_assert_eq!(profile.key, key);
        if !site.enabled {
            tracing::info!("Source {} disabled by configuration", profile.name);
            continue;
        }

        let base_url = match &site.base_url {
            Some(url) => Url::parse(url)
                .with_context(|| format!("Invalid base_url for source {}", key))?,
            None => Url::parse(profile.default_base_url)
                .with_context(|| format!("Invalid built-in base_url for source {}", key))?,
        };

        let source = HtmlSource::new(
            profile,
            base_url,
            transport.clone(),
            filter.clone(),
            timeout,
        )?
        .with_overrides(site.max_items, site.sort_by_length);

        adapters.push(Arc::new(source));
    }

    Ok(adapters)
}
