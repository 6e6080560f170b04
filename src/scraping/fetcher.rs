//! Outbound HTTP transport for source adapters
//!
//! `FetchEngine` wraps a shared reqwest client. Adapters talk to it through
//! the `Transport` trait so tests can substitute canned or slow transports.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

use crate::config::SourcesConfig;

/// Errors that can occur during fetching
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Content too large: {0} bytes")]
    ContentTooLarge(usize),
    #[error("Failed to build URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// HTTP status received from the site, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Request method supported by the sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully-built request to one site
#[derive(Debug, Clone)]
pub struct SiteRequest {
    pub method: Method,
    pub url: Url,
    /// Extra headers (user agent is added by the engine)
    pub headers: Vec<(String, String)>,
    /// Form fields, sent url-encoded for POST requests
    pub form: Vec<(String, String)>,
}

impl SiteRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    pub fn post_form(url: Url, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: Vec::new(),
            form,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Body of a successful (2xx) response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The fetched URL (may differ from request due to redirects)
    pub final_url: Url,
    pub status_code: u16,
    pub body: String,
    pub fetch_duration: Duration,
}

/// Sends a `SiteRequest` and returns the page body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SiteRequest) -> Result<FetchedPage, FetchError>;
}

/// Configuration for the fetch engine
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Maximum response size (bytes)
    pub max_content_size: usize,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from_config(&SourcesConfig::default())
    }
}

impl FetchConfig {
    pub fn from_config(config: &SourcesConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            max_content_size: config.max_body_bytes,
            max_redirects: 5,
        }
    }
}

/// reqwest-backed transport shared by every source
pub struct FetchEngine {
    http_client: reqwest::Client,
    config: FetchConfig,
}

impl FetchEngine {
    /// Create a new fetch engine
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn build(&self, request: &SiteRequest) -> reqwest::RequestBuilder {
        let mut builder = match request.method {
            Method::Get => self.http_client.get(request.url.as_str()),
            Method::Post => self.http_client.post(request.url.as_str()).form(&request.form),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

#[async_trait]
impl Transport for FetchEngine {
    async fn send(&self, request: &SiteRequest) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();

        // No client-wide timeout is set, so a reqwest timeout is the connect deadline
        let response = self.build(request).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.config.connect_timeout)
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();

        if let Some(len) = response.content_length() {
            if len as usize > self.config.max_content_size {
                return Err(FetchError::ContentTooLarge(len as usize));
            }
        }

        let body = response.text().await?;
        if body.len() > self.config.max_content_size {
            return Err(FetchError::ContentTooLarge(body.len()));
        }

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            body,
            fetch_duration: start.elapsed(),
        })
    }
}
