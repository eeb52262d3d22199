//! BBS Package Articles Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Articles, sections, pagination, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - DTOs, validated extractors, HTTP handlers, router
//!
//! ## Resource model
//! - Articles live in sections; a section is only a path token, never a record
//! - Every operation is scoped by section: an id from another section is not found
//! - `update` replaces content and keeps `id`, `section` and `created_at`
//! - Listing order is total (ties broken by id), so pages are stable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BbsConfig;
pub use error::{BbsError, BbsResult};
pub use infra::memory::InMemoryArticleRepository;
pub use infra::postgres::PgArticleRepository;
pub use presentation::router::{bbs_router, bbs_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
