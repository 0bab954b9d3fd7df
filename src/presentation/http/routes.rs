// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::articles,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Route table for the Article resource. The five bindings preserve the
/// resource's URL surface exactly, trailing slashes included:
///
/// | pattern         | method | handler          |
/// |-----------------|--------|------------------|
/// | `/`             | GET    | list_articles    |
/// | `/create/`      | POST   | create_article   |
/// | `/{pk}`         | GET    | get_article      |
/// | `/{pk}/update/` | PUT    | update_article   |
/// | `/{pk}/delete/` | DELETE | delete_article   |
///
/// Static segments win over the `{pk}` capture, so `/create/` never
/// reaches the detail handler.
pub fn article_routes() -> Router {
    Router::new()
        .route("/", get(articles::list_articles))
        .route("/create/", post(articles::create_article))
        .route("/{pk}", get(articles::get_article))
        .route("/{pk}/update/", put(articles::update_article))
        .route("/{pk}/delete/", delete(articles::delete_article))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .nest("/api/v1/articles", article_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if allowed_origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
