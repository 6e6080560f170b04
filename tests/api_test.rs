//! HTTP API tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot` against
//! stub sources, so no network is involved.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use dni_lookup::{
    api::{handlers::AppState, create_router, HttpServer},
    config::HttpConfig,
    query::LookupCoordinator,
    scraping::{FetchError, FetchedPage, NoiseFilter, SiteRequest, Transport},
    sources::{HtmlSource, SiteProfile, SourceAdapter},
    types::{Category, SourceResult},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use url::Url;

// ============ FIXTURES ============

/// Source returning fixed items and counting calls
struct StubSource {
    name: &'static str,
    items: Vec<&'static str>,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(name: &'static str, items: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            name,
            items,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SourceAdapter for StubSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch_source(&self, _dni: &str) -> SourceResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SourceResult::from_items(
            self.name,
            None,
            self.items.iter().map(|s| s.to_string()).collect(),
            format!("No se encontraron registros en {}.", self.name),
        )
    }
}

/// Transport that never answers within any reasonable timeout
struct HangingTransport;

#[async_trait]
impl Transport for HangingTransport {
    async fn send(&self, request: &SiteRequest) -> Result<FetchedPage, FetchError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(FetchedPage {
            final_url: request.url.clone(),
            status_code: 200,
            body: String::new(),
            fetch_duration: Duration::from_secs(30),
        })
    }
}

fn hanging_source(name: &'static str, timeout: Duration) -> Arc<dyn SourceAdapter> {
    let profile = SiteProfile {
        key: "hanging",
        name,
        category: Category::Otros,
        default_base_url: "http://hanging.invalid",
        selectors: &["p"],
        max_items: 10,
        sort_by_length: false,
        build_request: |base, _dni| Ok(SiteRequest::get(base.clone())),
    };
    Arc::new(
        HtmlSource::new(
            profile,
            Url::parse("http://hanging.invalid").unwrap(),
            Arc::new(HangingTransport),
            NoiseFilter::default(),
            timeout,
        )
        .unwrap(),
    )
}

fn erased(source: &Arc<StubSource>) -> Arc<dyn SourceAdapter> {
    source.clone()
}

fn router(sources: Vec<Arc<dyn SourceAdapter>>) -> axum::Router {
    create_router(AppState {
        coordinator: Arc::new(LookupCoordinator::new(sources)),
    })
}

async fn post_lookup(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/lookup")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============ LOOKUP ENDPOINT ============

#[tokio::test]
async fn test_partial_success_reports_timed_out_source() {
    let x = StubSource::new("X", vec!["JUAN PEREZ", "CALLE FALSA 123"]);
    let app = router(vec![erased(&x), hanging_source("Y", Duration::from_millis(200))]);

    let (status, body) = post_lookup(app, json!({"dni": "12345678"}).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());

    let sources = body["data"]["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["sourceName"], "X");
    assert_eq!(sources[0]["status"], "success");
    assert_eq!(sources[0]["items"], json!(["JUAN PEREZ", "CALLE FALSA 123"]));

    assert_eq!(sources[1]["sourceName"], "Y");
    assert_eq!(sources[1]["status"], "error");
    assert_eq!(sources[1]["items"], json!([]));
    assert_eq!(
        sources[1]["message"],
        "Y no respondió dentro de 0.2 segundos."
    );

    assert!(body["data"]["searchId"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_invalid_dni_is_rejected_without_calling_sources() {
    let x = StubSource::new("X", vec!["dato"]);
    let app = router(vec![erased(&x)]);

    let (status, body) = post_lookup(app, json!({"dni": "abc123"}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Un número de DNI válido es requerido.");
    assert!(body.get("data").is_none());
    assert_eq!(x.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_or_non_string_dni_is_rejected() {
    for payload in [
        json!({}).to_string(),
        json!({"dni": 12345678}).to_string(),
        json!({"dni": null}).to_string(),
        json!({"dni": ""}).to_string(),
        "not json at all".to_string(),
        String::new(),
    ] {
        let app = router(vec![erased(&StubSource::new("X", vec!["dato"]))]);
        let (status, body) = post_lookup(app, payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Un número de DNI válido es requerido.");
    }
}

#[tokio::test]
async fn test_all_sources_empty_is_not_found() {
    let app = router(vec![
        erased(&StubSource::new("A", vec![])),
        erased(&StubSource::new("B", vec![])),
    ]);

    let (status, body) = post_lookup(app, json!({"dni": "99999999"}).to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "No se encontraron resultados para el DNI ingresado."
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_each_request_queries_sources_again() {
    let x = StubSource::new("X", vec!["dato uno"]);
    let coordinator = Arc::new(LookupCoordinator::new(vec![erased(&x)]));
    let app = create_router(AppState { coordinator });

    for _ in 0..2 {
        let (status, _) = post_lookup(app.clone(), json!({"dni": "123"}).to_string()).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(x.calls.load(Ordering::SeqCst), 2);
}

// ============ HEALTH AND LAYERS ============

#[tokio::test]
async fn test_health_lists_sources() {
    let app = router(vec![
        erased(&StubSource::new("Datuar", vec![])),
        erased(&StubSource::new("Dateas", vec![])),
    ]);

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["sources"], json!(["Datuar", "Dateas"]));
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let coordinator = Arc::new(LookupCoordinator::new(vec![erased(&StubSource::new(
        "X",
        vec!["dato"],
    ))]));
    let app = HttpServer::new(HttpConfig::default(), coordinator).app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/lookup")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_lookup_rejects_get() {
    let app = router(vec![erased(&StubSource::new("X", vec!["dato"]))]);
    let request = Request::builder()
        .uri("/api/lookup")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
