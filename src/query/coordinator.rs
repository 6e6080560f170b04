//! Lookup coordinator: validates the DNI and fans out to every source

use anyhow::Context;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::scraping::{FetchConfig, FetchEngine};
use crate::sources::{build_registry, SourceAdapter};
use crate::types::{LookupResponse, SourceResult};
use crate::util::mask_dni;

/// Failures that reach the HTTP layer
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid DNI: {0}")]
    InvalidInput(String),
    #[error("no source returned results")]
    NoResultsFound,
    #[error("internal fault: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A DNI must be a non-empty string of ASCII decimal digits
pub fn validate_dni(dni: &str) -> Result<(), LookupError> {
    if dni.is_empty() {
        return Err(LookupError::InvalidInput("empty".to_string()));
    }
    if !dni.chars().all(|c| c.is_ascii_digit()) {
        return Err(LookupError::InvalidInput("non-digit characters".to_string()));
    }
    Ok(())
}

/// Orchestrates one lookup across the registered sources
pub struct LookupCoordinator {
    /// Adapters in registration order
    sources: Vec<Arc<dyn SourceAdapter>>,
}

impl LookupCoordinator {
    pub fn new(sources: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { sources }
    }

    /// Build the enabled sources from configuration over one shared HTTP client
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let engine = FetchEngine::new(FetchConfig::from_config(&config.sources))
            .context("Failed to build HTTP client")?;
        let sources = build_registry(config, Arc::new(engine))?;
        Ok(Self::new(sources))
    }

    /// Names of the registered sources, in order
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Run a lookup end to end.
    ///
    /// Every source runs concurrently in its own task and all of them are
    /// awaited. Results keep registration order regardless of completion
    /// order. Succeeds when at least one source produced items.
    pub async fn lookup(&self, dni: &str) -> Result<LookupResponse, LookupError> {
        validate_dni(dni)?;

        let start = Instant::now();
        let masked = mask_dni(dni);
        debug!("Lookup {}: querying {} sources", masked, self.sources.len());

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = source.clone();
                let dni = dni.to_string();
                tokio::spawn(async move { source.fetch_source(&dni).await })
            })
            .collect();

        let joined = join_all(handles).await;

        let mut results: Vec<SourceResult> = Vec::with_capacity(joined.len());
        for (source, outcome) in self.sources.iter().zip(joined) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) if e.is_panic() => {
                    error!("Source {} panicked during lookup {}", source.name(), masked);
                    results.push(SourceResult::error(
                        source.name(),
                        source.category(),
                        format!("Error interno al consultar {}.", source.name()),
                    ));
                }
                Err(e) => {
                    return Err(LookupError::Internal(anyhow::anyhow!(
                        "source task for {} did not complete: {}",
                        source.name(),
                        e
                    )));
                }
            }
        }

        let response = LookupResponse::new(results);
        let succeeded = response.successful_sources();

        info!(
            "Lookup {} completed in {}ms: {}/{} sources returned data",
            masked,
            start.elapsed().as_millis(),
            succeeded,
            response.sources.len()
        );

        if succeeded == 0 {
            return Err(LookupError::NoResultsFound);
        }

        Ok(response)
    }
}
