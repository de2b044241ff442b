use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use brandhub_brands::{Brand, BrandId, NewBrand};

use super::{BrandFilter, BrandSeeding, BrandStore, StoreError};

/// In-memory brand store for tests/dev.
///
/// Keeps brands in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBrandStore {
    brands: RwLock<Vec<Brand>>,
}

impl InMemoryBrandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory brand store lock poisoned".to_string())
}

#[async_trait]
impl BrandStore for InMemoryBrandStore {
    async fn find_all(&self) -> Result<Vec<Brand>, StoreError> {
        let brands = self.brands.read().map_err(poisoned)?;
        Ok(brands.clone())
    }

    async fn find_one(&self, id: BrandId) -> Result<Option<Brand>, StoreError> {
        let brands = self.brands.read().map_err(poisoned)?;
        Ok(brands.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, new_brands: Vec<NewBrand>) -> Result<Vec<Brand>, StoreError> {
        let now = Utc::now();
        let created: Vec<Brand> = new_brands
            .into_iter()
            .map(|n| Brand::create(n, now))
            .collect();

        let mut brands = self.brands.write().map_err(poisoned)?;
        brands.extend(created.iter().cloned());
        Ok(created)
    }
}

#[async_trait]
impl BrandSeeding for InMemoryBrandStore {
    async fn find_where(&self, filter: &BrandFilter) -> Result<Vec<Brand>, StoreError> {
        let brands = self.brands.read().map_err(poisoned)?;
        Ok(brands.iter().filter(|b| filter.matches(b)).cloned().collect())
    }

    async fn truncate(&self) -> Result<(), StoreError> {
        self.brands.write().map_err(poisoned)?.clear();
        Ok(())
    }
}
