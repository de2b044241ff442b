use std::sync::Arc;

use anyhow::Context;

use brandhub_infra::{BrandStore, InMemoryBrandStore, PostgresBrandStore};

use crate::config::ApiConfig;

/// Collaborators shared by every request handler.
///
/// Handlers hold no state of their own between requests; everything
/// persistent sits behind the brand store.
#[derive(Clone)]
pub struct AppServices {
    brands: Arc<dyn BrandStore>,
}

impl AppServices {
    pub fn new(brands: Arc<dyn BrandStore>) -> Self {
        Self { brands }
    }

    /// Services backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBrandStore::new()))
    }

    pub fn brands(&self) -> &dyn BrandStore {
        self.brands.as_ref()
    }
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices").finish_non_exhaustive()
    }
}

/// Pick the brand store from configuration: Postgres when a database URL is
/// configured (schema ensured at startup), otherwise in-memory.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("no database configured; brands are kept in memory");
        return Ok(AppServices::in_memory());
    };

    let store = PostgresBrandStore::connect(database_url, config.max_connections)
        .await
        .context("failed to connect to Postgres")?;
    store
        .ensure_schema()
        .await
        .context("failed to create brands schema")?;

    tracing::info!(max_connections = config.max_connections, "using Postgres brand store");
    Ok(AppServices::new(Arc::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_database_url_services_are_in_memory() {
        let services = build_services(&ApiConfig::default()).await.unwrap();
        assert!(services.brands().find_all().await.unwrap().is_empty());
    }
}
