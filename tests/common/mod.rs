//! Shared wiring for integration tests.
//!
//! [`TestApp`] mirrors the composition root in `lib.rs` but injects mock
//! collaborators and a fixed clock, so router tests never touch the network.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{DateTime, FixedOffset};
use civiclens_backend::{
    AppState,
    api::routes::create_router,
    bills::BillService,
    cache::FixedClock,
    congress::mock::MockCongressClient,
    llm::mock::MockLanguageModel,
    store::MemoryStore,
};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub congress: Arc<MockCongressClient>,
    pub llm: Arc<MockLanguageModel>,
    pub clock: Arc<FixedClock>,
}

/// Wednesday 10:00 at -05:00, inside the ten-minute window.
pub fn business_hours() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-01-15T10:00:00-05:00").unwrap()
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let congress = Arc::new(MockCongressClient::new());
        let llm = Arc::new(MockLanguageModel::new());
        let clock = Arc::new(FixedClock::new(business_hours()));

        let bills = BillService::new(store.clone(), congress.clone(), llm.clone(), clock.clone());
        let state = AppState { bills };

        Self {
            router: create_router(state),
            store,
            congress,
            llm,
            clock,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
