//! Store trait definitions
//!
//! Services depend on these traits rather than on Postgres directly so the
//! orchestration logic can be exercised with in-memory doubles.

use async_trait::async_trait;
use fleetops_geocoding::Point;
use uuid::Uuid;

use crate::{
    models::{IntegratedVendor, Place, Vendor},
    Result,
};

/// Ordering policy for place search. The asymmetry (distance when a
/// coordinate is supplied, otherwise name *descending*) is deliberate
/// product behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceOrdering {
    /// Ascending spherical distance from the point.
    DistanceFrom(Point),
    /// Descending lexicographic by name.
    NameDescending,
}

/// Shared contract for batch deletion by primary key, tenant-scoped.
/// Whether deletion is soft or physical is up to the implementation.
#[async_trait]
pub trait BulkDeleteStore: Send + Sync {
    /// Plural label used in user-facing messages ("places", "vendors", ...).
    fn resource_label(&self) -> &'static str;

    /// Count the rows the ids currently match. Runs as a separate statement
    /// from [`delete_by_ids`](Self::delete_by_ids); the pair is intentionally
    /// not transactional.
    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64>;

    /// Delete the matching rows, returning the number actually affected.
    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64>;
}

#[async_trait]
pub trait PlaceStore: BulkDeleteStore {
    /// Search the tenant's non-deleted places. `query` filters by free text
    /// when present; `limit` caps results after ordering when non-`None`.
    async fn search(
        &self,
        company_id: Uuid,
        query: Option<&str>,
        ordering: PlaceOrdering,
        limit: Option<i64>,
    ) -> Result<Vec<Place>>;

    async fn find(&self, company_id: Uuid, id: Uuid) -> Result<Option<Place>>;

    /// All non-deleted places of the tenant, unfiltered and unpaginated.
    async fn list_all(&self, company_id: Uuid) -> Result<Vec<Place>>;

    async fn insert(&self, place: &Place) -> Result<()>;
}

#[async_trait]
pub trait VendorStore: BulkDeleteStore {
    async fn insert(&self, vendor: &Vendor) -> Result<()>;

    async fn update(&self, vendor: &Vendor) -> Result<()>;

    async fn find_by_public_id(
        &self,
        company_id: Uuid,
        public_id: &str,
    ) -> Result<Option<Vendor>>;

    async fn list(&self, company_id: Uuid) -> Result<Vec<Vendor>>;
}

#[async_trait]
pub trait IntegratedVendorStore: BulkDeleteStore {
    async fn insert(&self, vendor: &IntegratedVendor) -> Result<()>;

    async fn list(&self, company_id: Uuid) -> Result<Vec<IntegratedVendor>>;
}
