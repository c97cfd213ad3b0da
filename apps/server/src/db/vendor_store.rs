//! PostgreSQL-backed `VendorStore` implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::traits::{BulkDeleteStore, VendorStore},
    models::Vendor,
    Error, Result,
};

const VENDOR_COLUMNS: &str = "id, public_id, company_id, name, email, phone, website_url, \
     place_id, logo_url, vendor_type, status, slug, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresVendorStore {
    pool: PgPool,
}

impl PostgresVendorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorStore for PostgresVendorStore {
    async fn insert(&self, vendor: &Vendor) -> Result<()> {
        sqlx::query(
            "INSERT INTO vendors \
               (id, public_id, company_id, name, email, phone, website_url, \
                place_id, logo_url, vendor_type, status, slug, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(vendor.id)
        .bind(&vendor.public_id)
        .bind(vendor.company_id)
        .bind(&vendor.name)
        .bind(&vendor.email)
        .bind(&vendor.phone)
        .bind(&vendor.website_url)
        .bind(vendor.place_id)
        .bind(&vendor.logo_url)
        .bind(&vendor.vendor_type)
        .bind(&vendor.status)
        .bind(&vendor.slug)
        .bind(vendor.created_at)
        .bind(vendor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    async fn update(&self, vendor: &Vendor) -> Result<()> {
        let result = sqlx::query(
            "UPDATE vendors SET \
               name = $3, email = $4, phone = $5, website_url = $6, place_id = $7, \
               logo_url = $8, vendor_type = $9, status = $10, slug = $11, updated_at = $12 \
             WHERE company_id = $1 AND id = $2",
        )
        .bind(vendor.company_id)
        .bind(vendor.id)
        .bind(&vendor.name)
        .bind(&vendor.email)
        .bind(&vendor.phone)
        .bind(&vendor.website_url)
        .bind(vendor.place_id)
        .bind(&vendor.logo_url)
        .bind(&vendor.vendor_type)
        .bind(&vendor.status)
        .bind(&vendor.slug)
        .bind(vendor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::ResourceNotFound {
                resource_type: "Vendor".to_string(),
                id: vendor.public_id.clone(),
            });
        }

        Ok(())
    }

    async fn find_by_public_id(
        &self,
        company_id: Uuid,
        public_id: &str,
    ) -> Result<Option<Vendor>> {
        let sql = format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors \
             WHERE company_id = $1 AND public_id = $2"
        );

        sqlx::query_as::<_, Vendor>(&sql)
            .bind(company_id)
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<Vendor>> {
        let sql = format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors \
             WHERE company_id = $1 \
             ORDER BY name ASC"
        );

        sqlx::query_as::<_, Vendor>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }
}

#[async_trait]
impl BulkDeleteStore for PostgresVendorStore {
    fn resource_label(&self) -> &'static str {
        "vendors"
    }

    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM vendors WHERE company_id = $1 AND id = ANY($2)",
        )
        .bind(company_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(count)
    }

    // Vendor deletion is physical.
    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        let result =
            sqlx::query("DELETE FROM vendors WHERE company_id = $1 AND id = ANY($2)")
                .bind(company_id)
                .bind(ids)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }
}
