// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::{ArticleBody, ArticleTitle, NewArticle},
};

pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
    pub publish: bool,
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let now = self.clock.now();

        let slug = self.slug_service.generate_unique_slug(&title, None).await?;

        let new_article = NewArticle {
            title,
            slug,
            body,
            published: command.publish,
            published_at: if command.publish { Some(now) } else { None },
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        tracing::info!(id = %created.id, slug = %created.slug, "article created");
        Ok(created.into())
    }
}
