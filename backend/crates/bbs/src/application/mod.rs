//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod delete_article;
pub mod list_articles;
pub mod read_article;
pub mod write_article;

pub use delete_article::DeleteArticleUseCase;
pub use list_articles::{ListArticlesInput, ListArticlesUseCase};
pub use read_article::ReadArticleUseCase;
pub use write_article::{StoreArticleUseCase, UpdateArticleUseCase};
