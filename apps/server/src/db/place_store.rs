//! PostgreSQL-backed `PlaceStore` implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::traits::{BulkDeleteStore, PlaceOrdering, PlaceStore},
    models::Place,
    Error, Result,
};

const PLACE_COLUMNS: &str = "id, public_id, company_id, name, street1, city, country, \
     latitude, longitude, created_at, updated_at, deleted_at";

/// Escape LIKE metacharacters so user input matches literally; a query of
/// `100%` must not match every row.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Ascending haversine distance from the bound point ($lat, $lon).
/// Spherical-earth approximation; plenty for ranking nearby places.
fn distance_order_clause(lat_bind: &str, lon_bind: &str) -> String {
    format!(
        "2 * 6371000 * asin(sqrt(least(1.0, \
           pow(sin(radians(latitude - {lat_bind}) / 2), 2) \
           + cos(radians({lat_bind})) * cos(radians(latitude)) \
           * pow(sin(radians(longitude - {lon_bind}) / 2), 2)))) ASC"
    )
}

#[derive(Clone)]
pub struct PostgresPlaceStore {
    pool: PgPool,
}

impl PostgresPlaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceStore for PostgresPlaceStore {
    async fn search(
        &self,
        company_id: Uuid,
        query: Option<&str>,
        ordering: PlaceOrdering,
        limit: Option<i64>,
    ) -> Result<Vec<Place>> {
        let query = query.map(escape_like);
        let text_filter = "($2::TEXT IS NULL \
             OR name ILIKE '%' || $2 || '%' \
             OR street1 ILIKE '%' || $2 || '%' \
             OR city ILIKE '%' || $2 || '%' \
             OR country ILIKE '%' || $2 || '%')";

        // LIMIT NULL means "no limit" in Postgres, so the cap binds uniformly.
        let places = match ordering {
            PlaceOrdering::DistanceFrom(point) => {
                let sql = format!(
                    "SELECT {PLACE_COLUMNS} FROM places \
                     WHERE company_id = $1 AND deleted_at IS NULL AND {text_filter} \
                     ORDER BY {} LIMIT $5",
                    distance_order_clause("$3", "$4")
                );
                sqlx::query_as::<_, Place>(&sql)
                    .bind(company_id)
                    .bind(query)
                    .bind(point.latitude)
                    .bind(point.longitude)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(Error::Database)?
            }
            PlaceOrdering::NameDescending => {
                let sql = format!(
                    "SELECT {PLACE_COLUMNS} FROM places \
                     WHERE company_id = $1 AND deleted_at IS NULL AND {text_filter} \
                     ORDER BY name DESC LIMIT $3"
                );
                sqlx::query_as::<_, Place>(&sql)
                    .bind(company_id)
                    .bind(query)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(Error::Database)?
            }
        };

        Ok(places)
    }

    async fn find(&self, company_id: Uuid, id: Uuid) -> Result<Option<Place>> {
        let sql = format!(
            "SELECT {PLACE_COLUMNS} FROM places \
             WHERE company_id = $1 AND id = $2 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, Place>(&sql)
            .bind(company_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn list_all(&self, company_id: Uuid) -> Result<Vec<Place>> {
        let sql = format!(
            "SELECT {PLACE_COLUMNS} FROM places \
             WHERE company_id = $1 AND deleted_at IS NULL \
             ORDER BY name ASC"
        );

        sqlx::query_as::<_, Place>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn insert(&self, place: &Place) -> Result<()> {
        sqlx::query(
            "INSERT INTO places \
               (id, public_id, company_id, name, street1, city, country, \
                latitude, longitude, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(place.id)
        .bind(&place.public_id)
        .bind(place.company_id)
        .bind(&place.name)
        .bind(&place.street1)
        .bind(&place.city)
        .bind(&place.country)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(place.created_at)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }
}

#[async_trait]
impl BulkDeleteStore for PostgresPlaceStore {
    fn resource_label(&self) -> &'static str {
        "places"
    }

    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM places \
             WHERE company_id = $1 AND id = ANY($2) AND deleted_at IS NULL",
        )
        .bind(company_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(count)
    }

    // Deletion is soft: mark and retain.
    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE places SET deleted_at = NOW(), updated_at = NOW() \
             WHERE company_id = $1 AND id = ANY($2) AND deleted_at IS NULL",
        )
        .bind(company_id)
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }
}
