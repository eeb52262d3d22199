//! Application Configuration
//!
//! Configuration for the BBS application layer.

use crate::domain::value_objects::{ArticleSort, PageRequest, SortOrder};

/// BBS application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbsConfig {
    /// Page size when the request omits `limit`
    pub default_limit: u32,
    /// Upper bound applied to any requested `limit`
    pub max_limit: u32,
}

impl Default for BbsConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: Self::LIMIT_CEILING,
        }
    }
}

impl BbsConfig {
    /// Largest `limit` the wire schema accepts
    pub const LIMIT_CEILING: u32 = 1000;

    /// Build a config with both limits clamped into `1..=LIMIT_CEILING`
    /// and `default_limit <= max_limit`.
    pub fn new(default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.clamp(1, Self::LIMIT_CEILING);
        Self {
            default_limit: default_limit.clamp(1, max_limit),
            max_limit,
        }
    }

    /// Apply defaults and the limit cap to raw request parameters
    pub fn page_request(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        sort: Option<ArticleSort>,
        order: Option<SortOrder>,
    ) -> PageRequest {
        PageRequest::new(
            page.unwrap_or(1),
            limit.unwrap_or(self.default_limit).min(self.max_limit),
            sort.unwrap_or_default(),
            order.unwrap_or_default(),
        )
    }
}
