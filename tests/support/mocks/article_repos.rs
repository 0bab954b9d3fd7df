// tests/support/mocks/article_repos.rs
use async_trait::async_trait;
use std::sync::Mutex;

use kawaraban::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate,
    ArticleWriteRepository, NewArticle,
};
use kawaraban::domain::errors::{DomainError, DomainResult};

/// インメモリの記事リポジトリ（読み書き両対応）
#[derive(Default)]
pub struct InMemoryArticleRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    articles: Vec<Article>,
    next_id: i64,
}

impl InMemoryArticleRepository {
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().articles.len()
    }

    pub fn get(&self, id: i64) -> Option<Article> {
        let state = self.state.lock().unwrap();
        state
            .articles
            .iter()
            .find(|a| i64::from(a.id) == id)
            .cloned()
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let stored = Article {
            id: ArticleId::new(state.next_id)?,
            title: article.title,
            slug: article.slug,
            body: article.body,
            published: article.published,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        state.articles.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut state = self.state.lock().unwrap();
        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("article {} not found", update.id)))?;

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(publish_state) = update.publish_state {
            article.published = publish_state.published;
            article.published_at = publish_state.published_at;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.articles.len();
        state.articles.retain(|a| a.id != id);
        if state.articles.len() == before {
            return Err(DomainError::NotFound(format!("article {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let state = self.state.lock().unwrap();
        Ok(state.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let state = self.state.lock().unwrap();
        Ok(state.articles.iter().find(|a| &a.slug == slug).cloned())
    }

    async fn list_paginated(
        &self,
        include_drafts: bool,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let state = self.state.lock().unwrap();
        let needle = search.map(str::to_lowercase);
        let mut filtered: Vec<Article> = state
            .articles
            .iter()
            .filter(|a| include_drafts || a.published)
            .filter(|a| {
                needle.as_ref().is_none_or(|q| {
                    a.title.as_str().to_lowercase().contains(q)
                        || a.body.as_str().to_lowercase().contains(q)
                })
            })
            .cloned()
            .collect();

        // Newest first, matching the SQLite repository's ordering.
        filtered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(i64::from(b.id).cmp(&i64::from(a.id)))
        });

        let total = filtered.len() as u64;
        let start = ((page.max(1) - 1) as usize) * (page_size as usize);
        let items = filtered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        Ok((items, total))
    }
}
