//! HTTP Handlers

use crate::application::config::BbsConfig;
use crate::application::delete_article::DeleteArticleUseCase;
use crate::application::list_articles::ListArticlesUseCase;
use crate::application::read_article::ReadArticleUseCase;
use crate::application::write_article::{StoreArticleUseCase, UpdateArticleUseCase};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_objects::Section;
use crate::error::BbsResult;
use crate::presentation::dto::{
    ArticleResponse, ArticleSummaryResponse, PageRequestDto, PageResponse, StoreArticleRequest,
};
use crate::presentation::extract::{
    ArticlePath, DayPath, SectionPath, ValidatedJson, ValidatedQuery,
};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

/// Shared state for BBS handlers
#[derive(Clone)]
pub struct BbsAppState<R>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BbsConfig>,
}

async fn list<R>(
    state: &BbsAppState<R>,
    section: &Section,
    req: PageRequestDto,
) -> BbsResult<Json<PageResponse<ArticleSummaryResponse>>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListArticlesUseCase::new(state.repo.clone(), state.config.clone());
    let page = use_case.execute(section, req.into()).await?;
    Ok(Json(page.into()))
}

/// PATCH /bbs/package/{section}/articles
pub async fn index<R>(
    State(state): State<BbsAppState<R>>,
    SectionPath(section): SectionPath,
    ValidatedJson(req): ValidatedJson<PageRequestDto>,
) -> BbsResult<Json<PageResponse<ArticleSummaryResponse>>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    list(&state, &section, req).await
}

/// GET /bbs/package/{section}/articles
pub async fn list_by_query<R>(
    State(state): State<BbsAppState<R>>,
    SectionPath(section): SectionPath,
    ValidatedQuery(req): ValidatedQuery<PageRequestDto>,
) -> BbsResult<Json<PageResponse<ArticleSummaryResponse>>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    list(&state, &section, req).await
}

/// GET /bbs/package/{section}/articles/{id}
pub async fn at<R>(
    State(state): State<BbsAppState<R>>,
    path: ArticlePath,
) -> BbsResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReadArticleUseCase::new(state.repo.clone());
    let article = use_case.at(&path.section, path.id).await?;
    Ok(Json(article.into()))
}

/// GET /bbs/package/{section}/articles/new/{date}
pub async fn newest_of_day<R>(
    State(state): State<BbsAppState<R>>,
    path: DayPath,
) -> BbsResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = ReadArticleUseCase::new(state.repo.clone());
    let article = use_case.newest_of_day(&path.section, path.date).await?;
    Ok(Json(article.into()))
}

/// POST /bbs/package/{section}/articles
pub async fn store<R>(
    State(state): State<BbsAppState<R>>,
    SectionPath(section): SectionPath,
    ValidatedJson(req): ValidatedJson<StoreArticleRequest>,
) -> BbsResult<impl IntoResponse>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = StoreArticleUseCase::new(state.repo.clone());
    let article = use_case.execute(section, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

/// PUT /bbs/package/{section}/articles/{id}
pub async fn update<R>(
    State(state): State<BbsAppState<R>>,
    path: ArticlePath,
    ValidatedJson(req): ValidatedJson<StoreArticleRequest>,
) -> BbsResult<Json<ArticleResponse>>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateArticleUseCase::new(state.repo.clone());
    let article = use_case
        .execute(&path.section, path.id, req.into())
        .await?;
    Ok(Json(article.into()))
}

/// DELETE /bbs/package/{section}/articles/{id}
pub async fn delete<R>(
    State(state): State<BbsAppState<R>>,
    path: ArticlePath,
) -> BbsResult<StatusCode>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteArticleUseCase::new(state.repo.clone());
    use_case.delete(&path.section, path.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /bbs/package/{section}/articles
pub async fn delete_all<R>(
    State(state): State<BbsAppState<R>>,
    SectionPath(section): SectionPath,
) -> BbsResult<StatusCode>
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteArticleUseCase::new(state.repo.clone());
    use_case.delete_all(&section).await?;
    Ok(StatusCode::NO_CONTENT)
}
