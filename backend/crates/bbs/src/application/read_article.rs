//! Read Article Use Case

use crate::domain::entities::Article;
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::Section;
use crate::error::{BbsError, BbsResult};
use chrono::NaiveDate;
use kernel::id::ArticleId;
use std::sync::Arc;

/// Read Article Use Case
pub struct ReadArticleUseCase<R>
where
    R: ArticleRepository,
{
    article_repo: Arc<R>,
}

impl<R> ReadArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(article_repo: Arc<R>) -> Self {
        Self { article_repo }
    }

    /// Fetch one article of a section
    pub async fn at(&self, section: &Section, id: ArticleId) -> BbsResult<Article> {
        self.article_repo
            .find_by_id(section, id)
            .await?
            .ok_or(BbsError::ArticleNotFound)
    }

    /// Latest article created on `date` (UTC) in a section
    pub async fn newest_of_day(&self, section: &Section, date: NaiveDate) -> BbsResult<Article> {
        self.article_repo
            .find_newest_of_day(section, date)
            .await?
            .ok_or(BbsError::ArticleNotFound)
    }
}
