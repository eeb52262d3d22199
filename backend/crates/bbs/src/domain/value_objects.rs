//! Domain Value Objects
//!
//! Immutable value types for the BBS domain.

use kernel::schema::{Schema, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section code - path-derived namespace partitioning articles
///
/// ## Invariants
/// - 1..=64 characters
/// - no `/` (a section is exactly one path segment)
/// - no leading or trailing whitespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Section(String);

impl Section {
    pub const MAX_LENGTH: usize = 64;

    pub fn schema() -> Schema {
        Schema::string().min_length(1).max_length(Self::MAX_LENGTH)
    }

    /// Validate a raw section code; errors are reported at `path`.
    pub fn parse(raw: &str, path: &str) -> Result<Self, ValidationError> {
        let value = serde_json::Value::String(raw.to_string());
        Self::schema().check(&value, path)?;
        if raw.contains('/') || raw.trim() != raw {
            return Err(ValidationError::new(
                path,
                "section code without '/' or surrounding whitespace",
                value,
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Section {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Listing sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleSort {
    #[default]
    CreatedAt,
    Title,
}

impl ArticleSort {
    pub const VARIANTS: &'static [&'static str] = &["created_at", "title"];
}

/// Listing direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const VARIANTS: &'static [&'static str] = &["asc", "desc"];
}

/// Resolved page request (defaults applied, limit clamped)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
    sort: ArticleSort,
    order: SortOrder,
}

impl PageRequest {
    /// `page` and `limit` are raised to at least 1.
    pub fn new(page: u32, limit: u32, sort: ArticleSort, order: SortOrder) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            sort,
            order,
        }
    }

    /// 1-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> ArticleSort {
        self.sort
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Number of records before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Page metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub limit: u32,
    /// Total records across all pages
    pub records: u64,
    /// Total number of pages
    pub pages: u64,
}

impl Pagination {
    pub fn new(request: &PageRequest, records: u64) -> Self {
        Self {
            current: request.page(),
            limit: request.limit(),
            records,
            pages: records.div_ceil(u64::from(request.limit())),
        }
    }
}

/// Window over an ordered collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: &PageRequest, records: u64, data: Vec<T>) -> Self {
        debug_assert!(data.len() <= request.limit() as usize);
        Self {
            pagination: Pagination::new(request, records),
            data,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            pagination: self.pagination,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
