// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, Response};
use once_cell::sync::Lazy;
use serde_json::Value;

use super::mocks::{FixedClock, InMemoryArticleRepository};
use kawaraban::application::ports::{time::Clock, util::SlugGenerator};
use kawaraban::application::services::ApplicationServices;
use kawaraban::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use kawaraban::infrastructure::util::DefaultSlugGenerator;
use kawaraban::presentation::http::{routes::build_router, state::HttpState};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .try_init();
});

/// Build application state backed by the in-memory repository; the repo
/// handle is returned so tests can inspect stored rows directly.
pub fn build_test_state() -> (HttpState, Arc<InMemoryArticleRepository>) {
    Lazy::force(&TRACING);

    let repo = Arc::new(InMemoryArticleRepository::default());
    let write: Arc<dyn ArticleWriteRepository> = repo.clone();
    let read: Arc<dyn ArticleReadRepository> = repo.clone();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::at_noon());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(write, read, clock, slugger));
    (HttpState { services }, repo)
}

pub fn make_test_router() -> (axum::Router, Arc<InMemoryArticleRepository>) {
    let (state, repo) = build_test_state();
    let origins = vec!["*".to_string()];
    (build_router(state, &origins), repo)
}

pub fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
