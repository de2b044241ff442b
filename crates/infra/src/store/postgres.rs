//! Postgres-backed brand store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | `PoolClosed`, `PoolTimedOut`, `Io`, `Tls` | `Unavailable` |
//! | `ColumnDecode`, `Decode`, `ColumnNotFound` | `Decode` |
//! | `Database` and anything else | `Query` |
//!
//! ## Ordering
//!
//! Rows carry an identity column `seq`; listings are ordered by it, so
//! brands inserted in one batch keep their input order.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::{Span, instrument};

use brandhub_brands::{Brand, BrandId, NewBrand};

use super::{BrandFilter, BrandSeeding, BrandStore, StoreError};

const SCHEMA: &str = include_str!("../../migrations/0001_create_brands.sql");

/// Postgres-backed brand store.
///
/// `PgPool` is internally reference counted, so cloning the store is cheap
/// and shares the pool.
#[derive(Debug, Clone)]
pub struct PostgresBrandStore {
    pool: PgPool,
}

impl PostgresBrandStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `brands` table and its indexes if they don't exist.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BrandStore for PostgresBrandStore {
    #[instrument(skip(self), fields(brand_count), err)]
    async fn find_all(&self) -> Result<Vec<Brand>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM brands
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        let brands = decode_rows(rows)?;
        Span::current().record("brand_count", brands.len());
        Ok(brands)
    }

    #[instrument(skip(self), fields(brand_id = %id), err)]
    async fn find_one(&self, id: BrandId) -> Result<Option<Brand>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM brands
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_one", e))?;

        row.map(|r| decode_row(&r)).transpose()
    }

    #[instrument(skip(self, new_brands), fields(brand_count = new_brands.len()), err)]
    async fn insert(&self, new_brands: Vec<NewBrand>) -> Result<Vec<Brand>, StoreError> {
        if new_brands.is_empty() {
            return Ok(vec![]);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("insert.begin", e))?;

        let mut created = Vec::with_capacity(new_brands.len());
        for new_brand in new_brands {
            let id = BrandId::new();
            let row = sqlx::query(
                r#"
                INSERT INTO brands (id, name)
                VALUES ($1, $2)
                RETURNING id, name, created_at, updated_at
                "#,
            )
            .bind(id.as_uuid())
            .bind(new_brand.name())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;
            created.push(decode_row(&row)?);
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("insert.commit", e))?;
        Ok(created)
    }
}

#[async_trait]
impl BrandSeeding for PostgresBrandStore {
    #[instrument(skip(self), err)]
    async fn find_where(&self, filter: &BrandFilter) -> Result<Vec<Brand>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at, updated_at
            FROM brands
            WHERE ($1::TEXT IS NULL OR name = $1)
            ORDER BY seq ASC
            "#,
        )
        .bind(filter.name.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_where", e))?;

        decode_rows(rows)
    }

    #[instrument(skip(self), err)]
    async fn truncate(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE brands RESTART IDENTITY")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("truncate", e))?;
        Ok(())
    }
}

fn decode_rows(rows: Vec<PgRow>) -> Result<Vec<Brand>, StoreError> {
    rows.iter().map(decode_row).collect()
}

fn decode_row(row: &PgRow) -> Result<Brand, StoreError> {
    BrandRow::from_row(row)
        .map(Brand::from)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool unavailable in {operation}: {err}"))
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            StoreError::Unavailable(format!("connection failed in {operation}: {err}"))
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err) => StoreError::Query(format!(
            "database error in {operation} (sqlstate {}): {}",
            db_err.code().as_deref().unwrap_or("unknown"),
            db_err.message()
        )),
        _ => StoreError::Query(format!("sqlx error in {operation}: {err}")),
    }
}

#[derive(Debug)]
struct BrandRow {
    id: uuid::Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for BrandRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(BrandRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand {
            id: BrandId::from_uuid(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> PostgresBrandStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let store = PostgresBrandStore::connect(&url, 2).await.unwrap();
        store.ensure_schema().await.unwrap();
        store.truncate().await.unwrap();
        store
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a disposable Postgres database"]
    async fn batch_insert_round_trips_in_order() {
        let store = store().await;
        let created = store
            .insert(vec![
                NewBrand::new("Patagonia").unwrap(),
                NewBrand::new("Newman's Own").unwrap(),
            ])
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, created);
        assert_eq!(all[0].name, "Patagonia");

        let found = store.find_one(created[1].id).await.unwrap().unwrap();
        assert_eq!(found.name, "Newman's Own");
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a disposable Postgres database"]
    async fn find_where_and_truncate() {
        let store = store().await;
        store
            .insert(vec![NewBrand::new("Patagonia").unwrap()])
            .await
            .unwrap();

        let hits = store.find_where(&BrandFilter::by_name("Patagonia")).await.unwrap();
        assert_eq!(hits.len(), 1);

        store.truncate().await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[test]
    fn pool_errors_map_to_unavailable() {
        let err = map_sqlx_error("find_all", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn row_not_found_maps_to_query() {
        let err = map_sqlx_error("find_one", sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Query(_)));
    }
}
