use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleBody, ArticleId, ArticleTitle, ArticleUpdate},
};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub publish: Option<bool>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let UpdateArticleCommand {
            id: _,
            title,
            body,
            publish,
        } = command;
        let mut update = ArticleUpdate::new(id, article.updated_at);

        let title_opt = title.map(ArticleTitle::new).transpose()?;
        let body_opt = body.map(ArticleBody::new).transpose()?;

        update = self
            .apply_content_updates(&mut article, title_opt, body_opt, update)
            .await?;

        if let Some(publish_flag) = publish {
            update = self.apply_publish_update(&mut article, publish_flag, update);
        }

        let updated = self.write_repo.update(update).await?;
        tracing::info!(id = %updated.id, "article updated");
        Ok(updated.into())
    }

    async fn apply_content_updates(
        &self,
        article: &mut Article,
        title_opt: Option<ArticleTitle>,
        body_opt: Option<ArticleBody>,
        mut update: ArticleUpdate,
    ) -> ApplicationResult<ArticleUpdate> {
        if title_opt.is_none() && body_opt.is_none() {
            return Ok(update);
        }

        let now = self.clock.now();
        let new_title = title_opt.clone().unwrap_or_else(|| article.title.clone());
        let new_body = body_opt.clone().unwrap_or_else(|| article.body.clone());
        article.set_content(new_title.clone(), new_body.clone(), now);
        update = update.with_title(new_title).with_body(new_body);
        update.set_updated_at(article.updated_at);

        // A changed title regenerates the slug, skipping this article when
        // probing for collisions.
        if let Some(title) = &title_opt {
            let slug = self
                .slug_service
                .generate_unique_slug(title, Some(article.id))
                .await?;
            article.set_slug(slug.clone(), now);
            update = update.with_slug(slug);
            update.set_updated_at(article.updated_at);
        }

        Ok(update)
    }

    fn apply_publish_update(
        &self,
        article: &mut Article,
        publish_flag: bool,
        mut update: ArticleUpdate,
    ) -> ArticleUpdate {
        if publish_flag != article.published {
            let now = self.clock.now();
            if publish_flag {
                article.publish(now);
            } else {
                article.unpublish(now);
            }
            update = update.with_publish_state(article.published, article.published_at);
            update.set_updated_at(article.updated_at);
        }

        update
    }
}
