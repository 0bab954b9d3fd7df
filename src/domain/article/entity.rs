// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleBody, ArticleId, ArticleSlug, ArticleTitle};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }

    pub fn set_slug(&mut self, slug: ArticleSlug, now: DateTime<Utc>) {
        self.slug = slug;
        self.updated_at = now;
    }

    pub fn set_content(&mut self, title: ArticleTitle, body: ArticleBody, now: DateTime<Utc>) {
        self.title = title;
        self.body = body;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub body: ArticleBody,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PublishStateUpdate {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update applied by the write repository. Absent fields keep the
/// stored value.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub body: Option<ArticleBody>,
    pub publish_state: Option<PublishStateUpdate>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            body: None,
            publish_state: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_publish_state(
        mut self,
        published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.publish_state = Some(PublishStateUpdate {
            published,
            published_at,
        });
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}
