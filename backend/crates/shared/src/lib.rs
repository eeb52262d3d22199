//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every bounded context agrees on:
//! - Common error types and result aliases
//! - Typed identifiers
//! - Declared shapes (`schema`) used to validate transport input, decode it,
//!   and generate conforming values for tests
//!
//! Anything here should mean the same thing in every context that uses it.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod schema;
