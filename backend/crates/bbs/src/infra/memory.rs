//! In-memory Repository Implementation
//!
//! Used when no database is configured, and by tests.

use chrono::NaiveDate;
use kernel::id::ArticleId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Article, ArticleSummary};
use crate::domain::repository::ArticleRepository;
use crate::domain::services::{newest_of_day, paginate};
use crate::domain::value_objects::{Page, PageRequest, Section};
use crate::error::BbsResult;

type SectionArticles = HashMap<ArticleId, Article>;

/// In-memory article store, partitioned by section.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArticleRepository {
    sections: Arc<RwLock<HashMap<Section, SectionArticles>>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored articles across all sections
    pub async fn len(&self) -> usize {
        self.sections.read().await.values().map(HashMap::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: &Article) -> BbsResult<()> {
        self.sections
            .write()
            .await
            .entry(article.section.clone())
            .or_default()
            .insert(article.id, article.clone());
        Ok(())
    }

    async fn find_by_id(&self, section: &Section, id: ArticleId) -> BbsResult<Option<Article>> {
        let sections = self.sections.read().await;
        Ok(sections
            .get(section)
            .and_then(|articles| articles.get(&id))
            .cloned())
    }

    async fn find_newest_of_day(
        &self,
        section: &Section,
        date: NaiveDate,
    ) -> BbsResult<Option<Article>> {
        let sections = self.sections.read().await;
        Ok(sections
            .get(section)
            .and_then(|articles| newest_of_day(articles.values(), date))
            .cloned())
    }

    async fn paginate(
        &self,
        section: &Section,
        request: &PageRequest,
    ) -> BbsResult<Page<ArticleSummary>> {
        let sections = self.sections.read().await;
        Ok(match sections.get(section) {
            Some(articles) => paginate(articles.values(), request),
            None => Page::new(request, 0, Vec::new()),
        })
    }

    async fn update(&self, article: &Article) -> BbsResult<bool> {
        let mut sections = self.sections.write().await;
        let slot = sections
            .get_mut(&article.section)
            .and_then(|articles| articles.get_mut(&article.id));

        Ok(match slot {
            Some(stored) => {
                stored.revise(article.content.clone());
                true
            }
            None => false,
        })
    }

    async fn delete(&self, section: &Section, id: ArticleId) -> BbsResult<bool> {
        let mut sections = self.sections.write().await;
        let Some(articles) = sections.get_mut(section) else {
            return Ok(false);
        };

        let removed = articles.remove(&id).is_some();
        if articles.is_empty() {
            sections.remove(section);
        }
        Ok(removed)
    }

    async fn delete_all(&self, section: &Section) -> BbsResult<u64> {
        let removed = self.sections.write().await.remove(section);
        Ok(removed.map_or(0, |articles| articles.len() as u64))
    }
}
