//! Store / Update Article Use Cases

use crate::domain::entities::{Article, ArticleContent};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::Section;
use crate::error::{BbsError, BbsResult};
use kernel::id::ArticleId;
use std::sync::Arc;

/// Store Article Use Case
pub struct StoreArticleUseCase<R>
where
    R: ArticleRepository,
{
    article_repo: Arc<R>,
}

impl<R> StoreArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(article_repo: Arc<R>) -> Self {
        Self { article_repo }
    }

    /// Create an article in `section` with a freshly assigned id
    pub async fn execute(&self, section: Section, content: ArticleContent) -> BbsResult<Article> {
        let article = Article::new(section, content);
        self.article_repo.create(&article).await?;

        tracing::info!(
            section = %article.section,
            article_id = %article.id,
            files = article.content.files.len(),
            "Stored article"
        );

        Ok(article)
    }
}

/// Update Article Use Case
pub struct UpdateArticleUseCase<R>
where
    R: ArticleRepository,
{
    article_repo: Arc<R>,
}

impl<R> UpdateArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(article_repo: Arc<R>) -> Self {
        Self { article_repo }
    }

    /// Replace the content of an article; `id`, `section` and `created_at` stay.
    pub async fn execute(
        &self,
        section: &Section,
        id: ArticleId,
        content: ArticleContent,
    ) -> BbsResult<Article> {
        let mut article = self
            .article_repo
            .find_by_id(section, id)
            .await?
            .ok_or(BbsError::ArticleNotFound)?;

        article.revise(content);

        // Deleted between the read and the write
        if !self.article_repo.update(&article).await? {
            return Err(BbsError::ArticleNotFound);
        }

        tracing::info!(section = %section, article_id = %id, "Updated article");

        Ok(article)
    }
}
