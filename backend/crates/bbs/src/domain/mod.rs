//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Article, ArticleSummary, AttachmentFile)
//! - Domain value objects (Section, PageRequest, Page)
//! - Domain services (listing order, windowing, day bounds)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
