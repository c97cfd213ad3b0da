//! PostgreSQL-backed `IntegratedVendorStore` implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::traits::{BulkDeleteStore, IntegratedVendorStore},
    models::IntegratedVendor,
    Error, Result,
};

#[derive(Clone)]
pub struct PostgresIntegratedVendorStore {
    pool: PgPool,
}

impl PostgresIntegratedVendorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntegratedVendorStore for PostgresIntegratedVendorStore {
    async fn insert(&self, vendor: &IntegratedVendor) -> Result<()> {
        sqlx::query(
            "INSERT INTO integrated_vendors \
               (id, public_id, company_id, provider, credentials, options, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(vendor.id)
        .bind(&vendor.public_id)
        .bind(vendor.company_id)
        .bind(&vendor.provider)
        .bind(&vendor.credentials)
        .bind(&vendor.options)
        .bind(vendor.created_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<IntegratedVendor>> {
        sqlx::query_as::<_, IntegratedVendor>(
            "SELECT id, public_id, company_id, provider, credentials, options, created_at \
             FROM integrated_vendors \
             WHERE company_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)
    }
}

#[async_trait]
impl BulkDeleteStore for PostgresIntegratedVendorStore {
    fn resource_label(&self) -> &'static str {
        "integrated vendors"
    }

    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM integrated_vendors WHERE company_id = $1 AND id = ANY($2)",
        )
        .bind(company_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(count)
    }

    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM integrated_vendors WHERE company_id = $1 AND id = ANY($2)",
        )
        .bind(company_id)
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }
}
