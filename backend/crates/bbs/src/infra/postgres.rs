//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::ArticleId;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{Article, ArticleContent, ArticleSummary, AttachmentFile};
use crate::domain::repository::ArticleRepository;
use crate::domain::services::day_bounds;
use crate::domain::value_objects::{ArticleSort, Page, PageRequest, Section, SortOrder};
use crate::error::{BbsError, BbsResult};

const ARTICLE_COLUMNS: &str =
    "bbs_article_id, section, writer, title, body, files, created_at";
const SUMMARY_COLUMNS: &str = "bbs_article_id, section, writer, title, created_at";

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// ORDER BY clause matching `domain::services::compare_articles`.
/// Titles compare bytewise (`COLLATE "C"`), like Rust strings.
fn order_by(request: &PageRequest) -> &'static str {
    match (request.sort(), request.order()) {
        (ArticleSort::CreatedAt, SortOrder::Asc) => "created_at ASC, bbs_article_id ASC",
        (ArticleSort::CreatedAt, SortOrder::Desc) => "created_at DESC, bbs_article_id DESC",
        (ArticleSort::Title, SortOrder::Asc) => "title COLLATE \"C\" ASC, bbs_article_id ASC",
        (ArticleSort::Title, SortOrder::Desc) => "title COLLATE \"C\" DESC, bbs_article_id DESC",
    }
}

impl ArticleRepository for PgArticleRepository {
    async fn create(&self, article: &Article) -> BbsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bbs_articles (
                bbs_article_id,
                section,
                writer,
                title,
                body,
                files,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(article.id.into_uuid())
        .bind(article.section.as_str())
        .bind(&article.content.writer)
        .bind(&article.content.title)
        .bind(&article.content.body)
        .bind(Json(FileRecord::from_files(&article.content.files)))
        .bind(article.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(article_id = %article.id, "Article inserted");
        Ok(())
    }

    async fn find_by_id(&self, section: &Section, id: ArticleId) -> BbsResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM bbs_articles WHERE section = $1 AND bbs_article_id = $2"
        ))
        .bind(section.as_str())
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ArticleRow::into_article).transpose()
    }

    async fn find_newest_of_day(
        &self,
        section: &Section,
        date: NaiveDate,
    ) -> BbsResult<Option<Article>> {
        let (start, end) = day_bounds(date);

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM bbs_articles
            WHERE section = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at DESC, bbs_article_id DESC
            LIMIT 1
            "#
        ))
        .bind(section.as_str())
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ArticleRow::into_article).transpose()
    }

    async fn paginate(
        &self,
        section: &Section,
        request: &PageRequest,
    ) -> BbsResult<Page<ArticleSummary>> {
        let records =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bbs_articles WHERE section = $1")
                .bind(section.as_str())
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, SummaryRow>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM bbs_articles
            WHERE section = $1
            ORDER BY {}
            LIMIT $2 OFFSET $3
            "#,
            order_by(request)
        ))
        .bind(section.as_str())
        .bind(i64::from(request.limit()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let data = rows
            .into_iter()
            .map(SummaryRow::into_summary)
            .collect::<BbsResult<Vec<_>>>()?;

        Ok(Page::new(request, records.max(0) as u64, data))
    }

    async fn update(&self, article: &Article) -> BbsResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bbs_articles
            SET writer = $3, title = $4, body = $5, files = $6
            WHERE section = $1 AND bbs_article_id = $2
            "#,
        )
        .bind(article.section.as_str())
        .bind(article.id.into_uuid())
        .bind(&article.content.writer)
        .bind(&article.content.title)
        .bind(&article.content.body)
        .bind(Json(FileRecord::from_files(&article.content.files)))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, section: &Section, id: ArticleId) -> BbsResult<bool> {
        let result =
            sqlx::query("DELETE FROM bbs_articles WHERE section = $1 AND bbs_article_id = $2")
                .bind(section.as_str())
                .bind(id.into_uuid())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self, section: &Section) -> BbsResult<u64> {
        let result = sqlx::query("DELETE FROM bbs_articles WHERE section = $1")
            .bind(section.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// Internal row types for sqlx mapping

/// JSONB element of `bbs_articles.files`
#[derive(Debug, Serialize, Deserialize)]
struct FileRecord {
    name: String,
    extension: Option<String>,
    url: String,
}

impl FileRecord {
    fn from_files(files: &[AttachmentFile]) -> Vec<FileRecord> {
        files
            .iter()
            .map(|file| FileRecord {
                name: file.name.clone(),
                extension: file.extension.clone(),
                url: file.url.clone(),
            })
            .collect()
    }

    fn into_file(self) -> AttachmentFile {
        AttachmentFile {
            name: self.name,
            extension: self.extension,
            url: self.url,
        }
    }
}

fn stored_section(raw: &str) -> BbsResult<Section> {
    Section::parse(raw, "bbs_articles.section")
        .map_err(|e| BbsError::Internal(format!("corrupt row: {e}")))
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    bbs_article_id: Uuid,
    section: String,
    writer: String,
    title: String,
    body: String,
    files: Json<Vec<FileRecord>>,
    created_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self) -> BbsResult<Article> {
        Ok(Article {
            id: ArticleId::from_uuid(self.bbs_article_id),
            section: stored_section(&self.section)?,
            content: ArticleContent {
                writer: self.writer,
                title: self.title,
                body: self.body,
                files: self
                    .files
                    .0
                    .into_iter()
                    .map(FileRecord::into_file)
                    .collect(),
            },
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    bbs_article_id: Uuid,
    section: String,
    writer: String,
    title: String,
    created_at: DateTime<Utc>,
}

impl SummaryRow {
    fn into_summary(self) -> BbsResult<ArticleSummary> {
        Ok(ArticleSummary {
            id: ArticleId::from_uuid(self.bbs_article_id),
            section: stored_section(&self.section)?,
            writer: self.writer,
            title: self.title,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::BbsConfig;

    #[test]
    fn test_order_by_matches_every_combination() {
        let config = BbsConfig::default();
        let cases = [
            (ArticleSort::CreatedAt, SortOrder::Asc, "created_at ASC, bbs_article_id ASC"),
            (ArticleSort::CreatedAt, SortOrder::Desc, "created_at DESC, bbs_article_id DESC"),
            (ArticleSort::Title, SortOrder::Asc, "title COLLATE \"C\" ASC, bbs_article_id ASC"),
            (ArticleSort::Title, SortOrder::Desc, "title COLLATE \"C\" DESC, bbs_article_id DESC"),
        ];
        for (sort, order, expected) in cases {
            let request = config.page_request(None, None, Some(sort), Some(order));
            assert_eq!(order_by(&request), expected);
        }
    }

    #[test]
    fn test_file_record_json_shape() {
        let files = vec![AttachmentFile {
            name: "logo".into(),
            extension: Some("png".into()),
            url: "https://example.com/logo.png".into(),
        }];
        let json = serde_json::to_value(FileRecord::from_files(&files)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "name": "logo", "extension": "png", "url": "https://example.com/logo.png" }])
        );

        let back: Vec<FileRecord> = serde_json::from_value(json).unwrap();
        let back: Vec<AttachmentFile> = back.into_iter().map(FileRecord::into_file).collect();
        assert_eq!(back, files);
    }
}
