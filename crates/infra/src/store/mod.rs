//! Brand persistence boundary.
//!
//! Handlers only see [`BrandStore`]. Fixture loading and resets used by test
//! harnesses go through [`BrandSeeding`], which production wiring never calls.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use brandhub_brands::{Brand, BrandId, NewBrand};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryBrandStore;
pub use postgres::PostgresBrandStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached (pool closed, IO, poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("failed to decode row: {0}")]
    Decode(String),
}

/// Read/write access to persisted brands.
#[async_trait]
pub trait BrandStore: Send + Sync {
    /// All brands, in creation order.
    async fn find_all(&self) -> Result<Vec<Brand>, StoreError>;

    async fn find_one(&self, id: BrandId) -> Result<Option<Brand>, StoreError>;

    /// Persist a batch, assigning ids and timestamps.
    ///
    /// The batch is all-or-nothing; results come back in input order.
    async fn insert(&self, brands: Vec<NewBrand>) -> Result<Vec<Brand>, StoreError>;
}

/// Conditions for [`BrandSeeding::find_where`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandFilter {
    pub name: Option<String>,
}

impl BrandFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn matches(&self, brand: &Brand) -> bool {
        self.name.as_deref().is_none_or(|n| n == brand.name)
    }
}

/// Test/fixture hooks: lookup by conditions and full reset.
#[async_trait]
pub trait BrandSeeding: BrandStore {
    async fn find_where(&self, filter: &BrandFilter) -> Result<Vec<Brand>, StoreError>;

    async fn truncate(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> BrandStore for Arc<S>
where
    S: BrandStore + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<Brand>, StoreError> {
        (**self).find_all().await
    }

    async fn find_one(&self, id: BrandId) -> Result<Option<Brand>, StoreError> {
        (**self).find_one(id).await
    }

    async fn insert(&self, brands: Vec<NewBrand>) -> Result<Vec<Brand>, StoreError> {
        (**self).insert(brands).await
    }
}

#[async_trait]
impl<S> BrandSeeding for Arc<S>
where
    S: BrandSeeding + ?Sized,
{
    async fn find_where(&self, filter: &BrandFilter) -> Result<Vec<Brand>, StoreError> {
        (**self).find_where(filter).await
    }

    async fn truncate(&self) -> Result<(), StoreError> {
        (**self).truncate().await
    }
}
