//! API DTOs (Data Transfer Objects)
//!
//! Each wire shape declares its [`Schema`]; extractors check requests against
//! it before decoding, and tests check responses against it.

use chrono::{DateTime, Utc};
use kernel::id::ArticleId;
use kernel::schema::{Field, Schema, Schematic};
use serde::{Deserialize, Serialize};

use crate::application::config::BbsConfig;
use crate::application::list_articles::ListArticlesInput;
use crate::domain::entities::{Article, ArticleContent, ArticleSummary, AttachmentFile};
use crate::domain::value_objects::{ArticleSort, Page, Pagination, Section, SortOrder};

pub const WRITER_MAX_LENGTH: usize = 32;
pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 50;
pub const BODY_MAX_LENGTH: usize = 65_535;
pub const FILES_MAX_ITEMS: usize = 16;

// ============================================================================
// Attachment
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentFileDto {
    pub name: String,
    /// Required key, `null` when the file has no extension
    pub extension: Option<String>,
    pub url: String,
}

impl Schematic for AttachmentFileDto {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("name", Schema::string().min_length(1).max_length(255)),
            Field::required(
                "extension",
                Schema::string().min_length(1).max_length(8).nullable(),
            ),
            Field::required("url", Schema::uri().max_length(2048)),
        ])
    }
}

impl From<AttachmentFileDto> for AttachmentFile {
    fn from(dto: AttachmentFileDto) -> Self {
        Self {
            name: dto.name,
            extension: dto.extension,
            url: dto.url,
        }
    }
}

impl From<AttachmentFile> for AttachmentFileDto {
    fn from(file: AttachmentFile) -> Self {
        Self {
            name: file.name,
            extension: file.extension,
            url: file.url,
        }
    }
}

// ============================================================================
// Store / Update
// ============================================================================

/// Request body for POST and PUT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreArticleRequest {
    pub writer: String,
    pub title: String,
    pub body: String,
    pub files: Vec<AttachmentFileDto>,
}

impl Schematic for StoreArticleRequest {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required(
                "writer",
                Schema::string().min_length(1).max_length(WRITER_MAX_LENGTH),
            ),
            Field::required(
                "title",
                Schema::string()
                    .min_length(TITLE_MIN_LENGTH)
                    .max_length(TITLE_MAX_LENGTH),
            ),
            Field::required("body", Schema::string().max_length(BODY_MAX_LENGTH)),
            Field::required(
                "files",
                Schema::array(AttachmentFileDto::schema()).max_items(FILES_MAX_ITEMS),
            ),
            // Identity comes from the path
            Field::ignored("id"),
            Field::ignored("section"),
        ])
    }
}

impl From<StoreArticleRequest> for ArticleContent {
    fn from(req: StoreArticleRequest) -> Self {
        Self {
            writer: req.writer,
            title: req.title,
            body: req.body,
            files: req.files.into_iter().map(AttachmentFile::from).collect(),
        }
    }
}

// ============================================================================
// Page request
// ============================================================================

/// Page request, as a PATCH body or as query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequestDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<ArticleSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl Schematic for PageRequestDto {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::optional(
                "page",
                Schema::integer().minimum(1).maximum(i64::from(u32::MAX)),
            ),
            Field::optional(
                "limit",
                Schema::integer()
                    .minimum(1)
                    .maximum(i64::from(BbsConfig::LIMIT_CEILING)),
            ),
            Field::optional("sort", Schema::one_of(ArticleSort::VARIANTS)),
            Field::optional("order", Schema::one_of(SortOrder::VARIANTS)),
        ])
    }
}

impl From<PageRequestDto> for ListArticlesInput {
    fn from(dto: PageRequestDto) -> Self {
        Self {
            page: dto.page,
            limit: dto.limit,
            sort: dto.sort,
            order: dto.order,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

fn section_schema() -> Schema {
    Section::schema()
}

/// Full article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: ArticleId,
    pub section: String,
    pub writer: String,
    pub title: String,
    pub body: String,
    pub files: Vec<AttachmentFileDto>,
    pub created_at: DateTime<Utc>,
}

impl Schematic for ArticleResponse {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("id", Schema::uuid()),
            Field::required("section", section_schema()),
            Field::required("writer", Schema::string().max_length(WRITER_MAX_LENGTH)),
            Field::required(
                "title",
                Schema::string()
                    .min_length(TITLE_MIN_LENGTH)
                    .max_length(TITLE_MAX_LENGTH),
            ),
            Field::required("body", Schema::string()),
            Field::required("files", Schema::array(AttachmentFileDto::schema())),
            Field::required("createdAt", Schema::date_time()),
        ])
    }
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            section: article.section.to_string(),
            writer: article.content.writer,
            title: article.content.title,
            body: article.content.body,
            files: article
                .content
                .files
                .into_iter()
                .map(AttachmentFileDto::from)
                .collect(),
            created_at: article.created_at,
        }
    }
}

/// Listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummaryResponse {
    pub id: ArticleId,
    pub section: String,
    pub writer: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Schematic for ArticleSummaryResponse {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required("id", Schema::uuid()),
            Field::required("section", section_schema()),
            Field::required("writer", Schema::string().max_length(WRITER_MAX_LENGTH)),
            Field::required(
                "title",
                Schema::string()
                    .min_length(TITLE_MIN_LENGTH)
                    .max_length(TITLE_MAX_LENGTH),
            ),
            Field::required("createdAt", Schema::date_time()),
        ])
    }
}

impl From<ArticleSummary> for ArticleSummaryResponse {
    fn from(summary: ArticleSummary) -> Self {
        Self {
            id: summary.id,
            section: summary.section.to_string(),
            writer: summary.writer,
            title: summary.title,
            created_at: summary.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub current: u32,
    pub limit: u32,
    pub records: u64,
    pub pages: u64,
}

impl From<Pagination> for PaginationResponse {
    fn from(p: Pagination) -> Self {
        Self {
            current: p.current,
            limit: p.limit,
            records: p.records,
            pages: p.pages,
        }
    }
}

/// Paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub pagination: PaginationResponse,
    pub data: Vec<T>,
}

impl<T: Schematic> Schematic for PageResponse<T> {
    fn schema() -> Schema {
        Schema::object(vec![
            Field::required(
                "pagination",
                Schema::object(vec![
                    Field::required("current", Schema::integer().minimum(1)),
                    Field::required("limit", Schema::integer().minimum(1)),
                    Field::required("records", Schema::integer().minimum(0)),
                    Field::required("pages", Schema::integer().minimum(0)),
                ]),
            ),
            Field::required("data", Schema::array(T::schema())),
        ])
    }
}

impl<T, U> From<Page<T>> for PageResponse<U>
where
    U: From<T>,
{
    fn from(page: Page<T>) -> Self {
        Self {
            pagination: page.pagination.into(),
            data: page.data.into_iter().map(U::from).collect(),
        }
    }
}
