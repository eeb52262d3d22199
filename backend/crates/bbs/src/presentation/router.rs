//! BBS Router

use crate::application::config::BbsConfig;
use crate::domain::repository::ArticleRepository;
use crate::infra::postgres::PgArticleRepository;
use crate::presentation::handlers::{self, BbsAppState};
use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;

/// Create the BBS router with PostgreSQL repository
pub fn bbs_router(repo: PgArticleRepository, config: BbsConfig) -> Router {
    bbs_router_generic(repo, config)
}

/// Create a generic BBS router for any repository implementation.
///
/// Routes are relative; the caller nests them (e.g. under `/bbs/package`).
pub fn bbs_router_generic<R>(repo: R, config: BbsConfig) -> Router
where
    R: ArticleRepository + Clone + Send + Sync + 'static,
{
    let state = BbsAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/{section}/articles",
            patch(handlers::index::<R>)
                .get(handlers::list_by_query::<R>)
                .post(handlers::store::<R>)
                .delete(handlers::delete_all::<R>),
        )
        .route(
            "/{section}/articles/new/{date}",
            get(handlers::newest_of_day::<R>),
        )
        .route(
            "/{section}/articles/{id}",
            get(handlers::at::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
        .with_state(state)
}
