//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::NaiveDate;
use kernel::id::ArticleId;

use crate::domain::entities::{Article, ArticleSummary};
use crate::domain::value_objects::{Page, PageRequest, Section};
use crate::error::BbsResult;

/// Article repository trait
///
/// Every lookup is scoped by section.
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// Insert a new article
    async fn create(&self, article: &Article) -> BbsResult<()>;

    /// Find an article by ID within a section
    async fn find_by_id(&self, section: &Section, id: ArticleId) -> BbsResult<Option<Article>>;

    /// Find the latest article created on a UTC calendar day
    async fn find_newest_of_day(
        &self,
        section: &Section,
        date: NaiveDate,
    ) -> BbsResult<Option<Article>>;

    /// One page of summaries in listing order
    async fn paginate(
        &self,
        section: &Section,
        request: &PageRequest,
    ) -> BbsResult<Page<ArticleSummary>>;

    /// Replace the content of an existing article
    /// Returns false if the article does not exist
    async fn update(&self, article: &Article) -> BbsResult<bool>;

    /// Delete one article
    /// Returns false if the article does not exist
    async fn delete(&self, section: &Section, id: ArticleId) -> BbsResult<bool>;

    /// Delete every article in a section, returning how many were removed
    async fn delete_all(&self, section: &Section) -> BbsResult<u64>;
}
