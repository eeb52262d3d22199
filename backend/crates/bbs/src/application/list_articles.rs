//! List Articles Use Case
//!
//! Serves both the body-borne and the query-borne listing; they differ only
//! in how the transport delivers [`ListArticlesInput`].

use crate::application::config::BbsConfig;
use crate::domain::entities::ArticleSummary;
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::{ArticleSort, Page, Section, SortOrder};
use crate::error::BbsResult;
use std::sync::Arc;

/// Input DTO for listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArticlesInput {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<ArticleSort>,
    pub order: Option<SortOrder>,
}

/// List Articles Use Case
pub struct ListArticlesUseCase<R>
where
    R: ArticleRepository,
{
    article_repo: Arc<R>,
    config: Arc<BbsConfig>,
}

impl<R> ListArticlesUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(article_repo: Arc<R>, config: Arc<BbsConfig>) -> Self {
        Self {
            article_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        section: &Section,
        input: ListArticlesInput,
    ) -> BbsResult<Page<ArticleSummary>> {
        let request = self
            .config
            .page_request(input.page, input.limit, input.sort, input.order);

        let page = self.article_repo.paginate(section, &request).await?;

        tracing::debug!(
            section = %section,
            page = request.page(),
            limit = request.limit(),
            records = page.pagination.records,
            "Listed articles"
        );

        Ok(page)
    }
}
