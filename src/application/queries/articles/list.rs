use super::ArticleQueryService;
use crate::application::{
    dto::{ArticleDto, Page},
    error::ApplicationResult,
};

pub struct ListArticlesQuery {
    pub include_drafts: bool,
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
}

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<Page<ArticleDto>> {
        let page = query.page.max(1);
        let page_size = normalize_page_size(query.page_size);
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let (records, total) = self
            .read_repo
            .list_paginated(query.include_drafts, page, page_size, search)
            .await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(Page::new(items, total, page, page_size))
    }
}

fn normalize_page_size(requested: u32) -> u32 {
    if requested == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        requested.min(MAX_PAGE_SIZE)
    }
}
