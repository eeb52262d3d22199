//! Delete Article Use Case

use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::Section;
use crate::error::{BbsError, BbsResult};
use kernel::id::ArticleId;
use std::sync::Arc;

/// Delete Article Use Case
pub struct DeleteArticleUseCase<R>
where
    R: ArticleRepository,
{
    article_repo: Arc<R>,
}

impl<R> DeleteArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(article_repo: Arc<R>) -> Self {
        Self { article_repo }
    }

    /// Remove one article. Repeating the call keeps failing with not found.
    pub async fn delete(&self, section: &Section, id: ArticleId) -> BbsResult<()> {
        if !self.article_repo.delete(section, id).await? {
            return Err(BbsError::ArticleNotFound);
        }

        tracing::info!(section = %section, article_id = %id, "Deleted article");
        Ok(())
    }

    /// Remove every article of a section. An empty section is not an error.
    pub async fn delete_all(&self, section: &Section) -> BbsResult<u64> {
        let deleted = self.article_repo.delete_all(section).await?;

        tracing::info!(section = %section, deleted, "Cleared section");
        Ok(deleted)
    }
}
