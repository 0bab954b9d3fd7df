use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleReadRepository, ArticleSlug, ArticleTitle,
    ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

fn map_error(err: sqlx::Error) -> DomainError {
    DomainError::Persistence(err.to_string())
}

const ARTICLE_COLUMNS: &str =
    "id, title, slug, body, published, published_at, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteArticleWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteArticleWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqliteArticleReadRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteArticleReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    published: i64,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            body: ArticleBody::new(row.body)?,
            published: row.published != 0,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for SqliteArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            body,
            published,
            published_at,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(
            "INSERT INTO articles (title, slug, body, published, published_at, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id, title, slug, body, published, published_at, created_at, updated_at",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(body.as_str())
        .bind(if published { 1_i64 } else { 0_i64 })
        .bind(published_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_error)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            body,
            publish_state,
            updated_at,
        } = update;

        // The publish pair is written together or not at all, so a plain
        // COALESCE cannot express "clear published_at on unpublish".
        let has_publish = publish_state.is_some();
        let (published, published_at) = publish_state
            .map(|state| (Some(state.published), state.published_at))
            .unwrap_or((None, None));

        let row = sqlx::query_as::<_, ArticleRow>(
            "UPDATE articles SET \
                title = COALESCE(?, title), \
                slug = COALESCE(?, slug), \
                body = COALESCE(?, body), \
                published = CASE WHEN ? THEN ? ELSE published END, \
                published_at = CASE WHEN ? THEN ? ELSE published_at END, \
                updated_at = ? \
             WHERE id = ? \
             RETURNING id, title, slug, body, published, published_at, created_at, updated_at",
        )
        .bind(title.as_ref().map(ArticleTitle::as_str))
        .bind(slug.as_ref().map(ArticleSlug::as_str))
        .bind(body.as_ref().map(ArticleBody::as_str))
        .bind(i64::from(has_publish))
        .bind(published.map(|p| if p { 1_i64 } else { 0_i64 }))
        .bind(i64::from(has_publish))
        .bind(published_at)
        .bind(updated_at)
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_error)?
        .ok_or_else(|| DomainError::NotFound(format!("article {id} not found")))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(i64::from(id))
            .execute(&*self.pool)
            .await
            .map_err(map_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("article {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for SqliteArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, slug, body, published, published_at, created_at, updated_at FROM articles WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_error)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, slug, body, published, published_at, created_at, updated_at FROM articles WHERE slug = ?",
        )
        .bind(slug.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_error)?;

        row.map(Article::try_from).transpose()
    }

    async fn list_paginated(
        &self,
        include_drafts: bool,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);
        let search_pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        fn apply_conditions<'a>(
            builder: &mut QueryBuilder<'a, Sqlite>,
            include_drafts: bool,
            search_pattern: Option<&'a str>,
        ) {
            let mut has_where = false;
            if !include_drafts {
                builder.push(" WHERE published = 1");
                has_where = true;
            }

            if let Some(pattern) = search_pattern {
                if has_where {
                    builder.push(" AND (");
                } else {
                    builder.push(" WHERE (");
                }
                builder.push("title LIKE ");
                builder.push_bind(pattern);
                builder.push(" OR body LIKE ");
                builder.push_bind(pattern);
                builder.push(")");
            }
        }

        let mut list_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        apply_conditions(&mut list_builder, include_drafts, search_pattern.as_deref());
        list_builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        list_builder.push_bind(i64::from(page_size));
        list_builder.push(" OFFSET ");
        list_builder.push_bind(offset);

        let rows = list_builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_error)?;

        let mut count_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT COUNT(1) FROM articles");
        apply_conditions(
            &mut count_builder,
            include_drafts,
            search_pattern.as_deref(),
        );

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&*self.pool)
            .await
            .map_err(map_error)?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((articles, total.unsigned_abs()))
    }
}
