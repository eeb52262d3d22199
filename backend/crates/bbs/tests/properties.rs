//! Resource laws of the article store, checked over generated inputs.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use bbs::application::{
    DeleteArticleUseCase, ListArticlesInput, ListArticlesUseCase, ReadArticleUseCase,
    StoreArticleUseCase, UpdateArticleUseCase,
};
use bbs::models::{ArticleContent, ArticleSort, Section, SortOrder, StoreArticleRequest};
use bbs::{BbsConfig, BbsError, InMemoryArticleRepository, bbs_router_generic};
use kernel::schema::{Schematic, decode};
use proptest::prelude::*;
use serde_json::Value;
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn section_strategy() -> impl Strategy<Value = Section> {
    "[a-z0-9_-]{1,64}".prop_map(|raw| Section::parse(&raw, "$input.section").unwrap())
}

fn content_strategy() -> impl Strategy<Value = ArticleContent> {
    StoreArticleRequest::schema().strategy().prop_map(|value| {
        decode::<StoreArticleRequest>(value, "$input")
            .unwrap()
            .into()
    })
}

fn sort_strategy() -> impl Strategy<Value = (ArticleSort, SortOrder)> {
    (
        prop_oneof![Just(ArticleSort::CreatedAt), Just(ArticleSort::Title)],
        prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)],
    )
}

async fn get_json(app: &Router, method: Method, uri: &str, body: Option<String>) -> Value {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: a stored article is read back unchanged.
    #[test]
    fn store_then_at(section in section_strategy(), content in content_strategy()) {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let (stored, read) = runtime().block_on(async {
            let stored = StoreArticleUseCase::new(repo.clone())
                .execute(section.clone(), content.clone())
                .await
                .unwrap();
            let read = ReadArticleUseCase::new(repo.clone())
                .at(&section, stored.id)
                .await
                .unwrap();
            (stored, read)
        });
        prop_assert_eq!(&read, &stored);
        prop_assert_eq!(read.content, content);
        prop_assert_eq!(read.section, section);
    }

    /// Property: update replaces content and keeps id, section and creation time.
    #[test]
    fn update_preserves_identity(
        section in section_strategy(),
        before in content_strategy(),
        after in content_strategy(),
    ) {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let (stored, updated) = runtime().block_on(async {
            let stored = StoreArticleUseCase::new(repo.clone())
                .execute(section.clone(), before)
                .await
                .unwrap();
            let updated = UpdateArticleUseCase::new(repo.clone())
                .execute(&section, stored.id, after.clone())
                .await
                .unwrap();
            (stored, updated)
        });
        prop_assert_eq!(updated.id, stored.id);
        prop_assert_eq!(updated.section, stored.section);
        prop_assert_eq!(updated.created_at, stored.created_at);
        prop_assert_eq!(updated.content, after);
    }

    /// Property: a deleted article is gone.
    #[test]
    fn delete_then_not_found(section in section_strategy(), content in content_strategy()) {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let result = runtime().block_on(async {
            let stored = StoreArticleUseCase::new(repo.clone())
                .execute(section.clone(), content)
                .await
                .unwrap();
            DeleteArticleUseCase::new(repo.clone())
                .delete(&section, stored.id)
                .await
                .unwrap();
            ReadArticleUseCase::new(repo.clone()).at(&section, stored.id).await
        });
        prop_assert!(matches!(result, Err(BbsError::ArticleNotFound)));
    }

    /// Property: after delete_all no page of the section has data.
    #[test]
    fn delete_all_empties_section(
        section in section_strategy(),
        contents in proptest::collection::vec(content_strategy(), 0..8),
        page in 1u32..4,
        limit in 1u32..10,
        (sort, order) in sort_strategy(),
    ) {
        let repo = Arc::new(InMemoryArticleRepository::new());
        let listed = runtime().block_on(async {
            let store = StoreArticleUseCase::new(repo.clone());
            for content in contents {
                store.execute(section.clone(), content).await.unwrap();
            }
            DeleteArticleUseCase::new(repo.clone())
                .delete_all(&section)
                .await
                .unwrap();
            ListArticlesUseCase::new(repo.clone(), Arc::new(BbsConfig::default()))
                .execute(
                    &section,
                    ListArticlesInput {
                        page: Some(page),
                        limit: Some(limit),
                        sort: Some(sort),
                        order: Some(order),
                    },
                )
                .await
                .unwrap()
        });
        prop_assert!(listed.data.is_empty());
        prop_assert_eq!(listed.pagination.records, 0);
    }

    /// Property: body-borne and query-borne listings agree.
    #[test]
    fn index_equals_list_by_query(
        contents in proptest::collection::vec(content_strategy(), 0..8),
        page in 1u32..4,
        limit in 1u32..10,
        (sort, order) in sort_strategy(),
    ) {
        let repo = InMemoryArticleRepository::new();
        let section = Section::parse("general", "$input.section").unwrap();
        let (by_body, by_query) = runtime().block_on(async {
            let store = StoreArticleUseCase::new(Arc::new(repo.clone()));
            for content in contents {
                store.execute(section.clone(), content).await.unwrap();
            }

            let app = Router::new().nest(
                "/bbs/package",
                bbs_router_generic(repo.clone(), BbsConfig::default()),
            );
            let sort = serde_json::to_value(sort).unwrap();
            let order = serde_json::to_value(order).unwrap();
            let (sort, order) = (sort.as_str().unwrap(), order.as_str().unwrap());

            let body = format!(
                r#"{{"page":{page},"limit":{limit},"sort":"{sort}","order":"{order}"}}"#
            );
            let by_body = get_json(&app, Method::PATCH, "/bbs/package/general/articles", Some(body)).await;

            let uri = format!(
                "/bbs/package/general/articles?page={page}&limit={limit}&sort={sort}&order={order}"
            );
            let by_query = get_json(&app, Method::GET, &uri, None).await;
            (by_body, by_query)
        });
        prop_assert_eq!(by_body, by_query);
    }
}
