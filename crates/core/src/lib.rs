//! `brandhub-core` — shared building blocks for the brand catalogue.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage):
//! the domain error model, typed identifiers and the JSON-schema-style
//! payload validator.

pub mod error;
pub mod id;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use validation::{JsonType, ObjectSchema, PropertySchema, ValidationErrors, Violation};

#[doc(hidden)]
pub use uuid as __uuid;
