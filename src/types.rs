//! Core types for the lookup service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Static build tag reported in every lookup envelope
pub const ENGINE_VERSION: &str = concat!("dni-lookup/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Per-source results
// ============================================================================

/// Coarse classification of a source. Informative only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Personal,
    Fiscal,
    Judicial,
    Otros,
}

/// Outcome of a single source query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Error,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of querying one external site for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResult {
    /// Human-readable label of the site
    pub source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Distinct, cleaned text fragments in final order
    pub items: Vec<String>,
    pub status: SourceStatus,
    /// Explanation, always present when `status` is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl SourceResult {
    /// Build a result from extracted items.
    ///
    /// The status is derived from the items: an empty list is never a
    /// success, so callers that end up with nothing get `empty_message`.
    pub fn from_items(
        source_name: impl Into<String>,
        category: Option<Category>,
        items: Vec<String>,
        empty_message: impl Into<String>,
    ) -> Self {
        if items.is_empty() {
            Self::error(source_name, category, empty_message)
        } else {
            Self {
                source_name: source_name.into(),
                category,
                items,
                status: SourceStatus::Success,
                message: None,
                metadata: None,
            }
        }
    }

    /// Build an error result with no items
    pub fn error(
        source_name: impl Into<String>,
        category: Option<Category>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            category,
            items: Vec::new(),
            status: SourceStatus::Error,
            message: Some(message.into()),
            metadata: None,
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == SourceStatus::Success
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// Aggregate result of one lookup request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    /// One entry per configured source, in registration order
    pub sources: Vec<SourceResult>,
    pub search_id: String,
    pub timestamp: DateTime<Utc>,
    pub engine_version: String,
}

impl LookupResponse {
    /// Wrap collected source results with a fresh search id and timestamp
    pub fn new(sources: Vec<SourceResult>) -> Self {
        Self {
            sources,
            search_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
        }
    }

    /// Number of sources that produced data
    pub fn successful_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_success()).count()
    }
}

/// Outer success/error envelope. Exactly one of `data`/`error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_items_become_error() {
        let result = SourceResult::from_items("Datuar", Some(Category::Personal), vec![], "nada");
        assert_eq!(result.status, SourceStatus::Error);
        assert_eq!(result.message.as_deref(), Some("nada"));
    }

    #[test]
    fn test_source_result_wire_format() {
        let result = SourceResult::from_items(
            "Datuar",
            Some(Category::Personal),
            vec!["PEREZ JUAN".to_string()],
            "nada",
        )
        .with_metadata("elapsedMs", "12");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sourceName"], "Datuar");
        assert_eq!(json["category"], "Personal");
        assert_eq!(json["status"], "success");
        assert_eq!(json["metadata"]["elapsedMs"], "12");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_lookup_response_mints_fresh_ids() {
        let a = LookupResponse::new(vec![]);
        let b = LookupResponse::new(vec![]);
        assert_ne!(a.search_id, b.search_id);
        assert_eq!(a.engine_version, ENGINE_VERSION);

        let json = serde_json::to_value(&a).unwrap();
        assert!(json.get("searchId").is_some());
        assert!(json.get("engineVersion").is_some());
    }

    #[test]
    fn test_api_response_sets_exactly_one_side() {
        let ok: ApiResponse<u32> = ApiResponse::ok(7);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());

        let err: ApiResponse<u32> = ApiResponse::err("boom");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
