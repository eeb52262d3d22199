//! Request extractors
//!
//! Path, query and body extractors that check their input against a
//! [`Schema`] and reject with [`BbsError`], so every malformed request is
//! answered with the same problem document.

use std::collections::HashMap;
use std::str::FromStr;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use chrono::NaiveDate;
use kernel::id::ArticleId;
use kernel::schema::{Schema, Schematic, ValidationError, decode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::value_objects::Section;
use crate::error::BbsError;

const SECTION_PATH: &str = "$input.section";
const ID_PATH: &str = "$input.id";
const DATE_PATH: &str = "$input.date";

async fn path_params<S>(parts: &mut Parts, state: &S) -> Result<HashMap<String, String>, BbsError>
where
    S: Send + Sync,
{
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|e| BbsError::MalformedRequest(e.body_text()))?;
    Ok(params)
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, BbsError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| BbsError::MalformedRequest(format!("missing path parameter `{name}`")))
}

fn parse_section(params: &HashMap<String, String>) -> Result<Section, BbsError> {
    Ok(Section::parse(param(params, "section")?, SECTION_PATH)?)
}

fn parse_id(raw: &str) -> Result<ArticleId, BbsError> {
    Schema::uuid().check(&Value::String(raw.to_string()), ID_PATH)?;
    ArticleId::from_str(raw).map_err(|_| {
        BbsError::Validation(ValidationError::new(
            ID_PATH,
            Schema::uuid().describe(),
            Value::String(raw.to_string()),
        ))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, BbsError> {
    Schema::date().check(&Value::String(raw.to_string()), DATE_PATH)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        BbsError::Validation(ValidationError::new(
            DATE_PATH,
            Schema::date().describe(),
            Value::String(raw.to_string()),
        ))
    })
}

/// `/{section}/...`
#[derive(Debug, Clone)]
pub struct SectionPath(pub Section);

impl<S> FromRequestParts<S> for SectionPath
where
    S: Send + Sync,
{
    type Rejection = BbsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        Ok(Self(parse_section(&params)?))
    }
}

/// `/{section}/articles/{id}`
#[derive(Debug, Clone)]
pub struct ArticlePath {
    pub section: Section,
    pub id: ArticleId,
}

impl<S> FromRequestParts<S> for ArticlePath
where
    S: Send + Sync,
{
    type Rejection = BbsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        Ok(Self {
            section: parse_section(&params)?,
            id: parse_id(param(&params, "id")?)?,
        })
    }
}

/// `/{section}/articles/new/{date}`
#[derive(Debug, Clone)]
pub struct DayPath {
    pub section: Section,
    pub date: NaiveDate,
}

impl<S> FromRequestParts<S> for DayPath
where
    S: Send + Sync,
{
    type Rejection = BbsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;
        Ok(Self {
            section: parse_section(&params)?,
            date: parse_date(param(&params, "date")?)?,
        })
    }
}

/// JSON body checked against `T::schema()` before deserialization
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Schematic + DeserializeOwned,
{
    type Rejection = BbsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| BbsError::MalformedRequest(e.body_text()))?;
        Ok(Self(decode(value, "$input")?))
    }
}

/// Query string coerced through `T::schema()`, then decoded like a body
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: Schematic + DeserializeOwned,
{
    type Rejection = BbsError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| BbsError::MalformedRequest(e.body_text()))?;
        let value = T::schema().coerce_query(&pairs, "$input")?;
        Ok(Self(decode(value, "$input")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dto::PageRequestDto;
    use crate::domain::value_objects::{ArticleSort, SortOrder};
    use axum::http::Request as HttpRequest;

    async fn query_of(uri: &str) -> Result<PageRequestDto, BbsError> {
        let (mut parts, _) = HttpRequest::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<PageRequestDto>::from_request_parts(&mut parts, &())
            .await
            .map(|ValidatedQuery(dto)| dto)
    }

    #[test]
    fn test_parse_id_rejects_non_uuid() {
        let err = parse_id("not-a-uuid").unwrap_err();
        match err {
            BbsError::Validation(e) => assert_eq!(e.path(), ID_PATH),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_date_rejects_impossible_day() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-2-3").is_err());
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[tokio::test]
    async fn test_query_coerces_numbers_and_enums() {
        let dto = query_of("/x?page=2&limit=10&sort=title&order=asc").await.unwrap();
        assert_eq!(dto.page, Some(2));
        assert_eq!(dto.limit, Some(10));
        assert_eq!(dto.sort, Some(ArticleSort::Title));
        assert_eq!(dto.order, Some(SortOrder::Asc));
    }

    #[tokio::test]
    async fn test_empty_query_is_all_defaults() {
        let dto = query_of("/x").await.unwrap();
        assert_eq!(dto, PageRequestDto::default());
    }

    #[tokio::test]
    async fn test_query_rejects_out_of_range_limit() {
        let err = query_of("/x?limit=0").await.unwrap_err();
        match err {
            BbsError::Validation(e) => assert_eq!(e.path(), "$input.limit"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_query_rejects_unknown_key() {
        assert!(matches!(
            query_of("/x?foo=1").await,
            Err(BbsError::Validation(_))
        ));
    }
}
