// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
    dto::{ArticleDto, Page},
    queries::articles::{GetArticleByIdQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListArticlesParams {
    /// 1-based page index.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Include unpublished articles in the listing.
    #[serde(default)]
    pub include_drafts: bool,
    /// Substring filter over title and body.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub publish: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/",
    params(ListArticlesParams),
    responses(
        (status = 200, description = "Paged article listing.", body = crate::presentation::http::openapi::ArticleListResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListArticlesParams>,
) -> HttpResult<Json<Page<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            include_drafts: params.include_drafts,
            page: params.page,
            page_size: params.page_size,
            search: params.q,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/create/",
    request_body = CreateArticleRequest,
    responses(
        (status = 200, description = "The created article.", body = ArticleDto),
        (status = 400, description = "Invalid title or body.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = CreateArticleCommand {
        title: payload.title,
        body: payload.body,
        publish: payload.publish,
    };

    state
        .services
        .article_commands
        .create_article(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{pk}",
    params(("pk" = i64, Path, description = "Article primary key")),
    responses(
        (status = 200, description = "The requested article.", body = ArticleDto),
        (status = 404, description = "No article with this primary key.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(pk): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id: pk })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{pk}/update/",
    params(("pk" = i64, Path, description = "Article primary key")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "The updated article.", body = ArticleDto),
        (status = 404, description = "No article with this primary key.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Path(pk): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id: pk,
        title: payload.title,
        body: payload.body,
        publish: payload.publish,
    };

    state
        .services
        .article_commands
        .update_article(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{pk}/delete/",
    params(("pk" = i64, Path, description = "Article primary key")),
    responses(
        (status = 200, description = "Deletion confirmation."),
        (status = 404, description = "No article with this primary key.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Path(pk): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { id: pk })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}
