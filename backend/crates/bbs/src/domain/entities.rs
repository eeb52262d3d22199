//! Domain Entities
//!
//! Core business entities for the BBS domain.

use chrono::{DateTime, SubsecRound, Utc};
use kernel::id::ArticleId;

use crate::domain::value_objects::Section;

/// File attached to an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    pub name: String,
    pub extension: Option<String>,
    pub url: String,
}

/// Caller-supplied part of an article, accepted by `store` and `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    pub writer: String,
    pub title: String,
    pub body: String,
    pub files: Vec<AttachmentFile>,
}

/// Article entity
///
/// `id`, `section` and `created_at` are fixed at creation; only `content`
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub section: Section,
    pub content: ArticleContent,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Create a new article with a fresh id
    pub fn new(section: Section, content: ArticleContent) -> Self {
        Self {
            id: ArticleId::new(),
            section,
            content,
            // Microseconds: what PostgreSQL `timestamptz` keeps
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// Replace the content, keeping identity
    pub fn revise(&mut self, content: ArticleContent) {
        self.content = content;
    }

    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id,
            section: self.section.clone(),
            writer: self.content.writer.clone(),
            title: self.content.title.clone(),
            created_at: self.created_at,
        }
    }
}

/// Listing projection of an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub id: ArticleId,
    pub section: Section,
    pub writer: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
