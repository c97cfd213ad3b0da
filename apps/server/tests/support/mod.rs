//! Shared test doubles: in-memory stores, a scripted geocoder, and an
//! in-memory audit sink.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use fleetops_geocoding::{GeocodeResult, Geocoder, Point};
use uuid::Uuid;

use fleetops::{
    db::{
        audit::{AuditEvent, AuditSink},
        BulkDeleteStore, IntegratedVendorStore, PlaceOrdering, PlaceStore, VendorStore,
    },
    models::{IntegratedVendor, Place, Vendor},
    Result,
};

pub fn place(company_id: Uuid, name: &str, latitude: f64, longitude: f64) -> Place {
    Place {
        id: Uuid::new_v4(),
        public_id: Place::new_public_id(),
        company_id,
        name: name.to_string(),
        street1: None,
        city: None,
        country: None,
        latitude,
        longitude,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

pub fn geocode_result(address: &str, latitude: f64, longitude: f64) -> GeocodeResult {
    GeocodeResult {
        formatted_address: address.to_string(),
        latitude,
        longitude,
        country: None,
        postal_code: None,
    }
}

/// In-memory `PlaceStore` mirroring the Postgres implementation's contract:
/// tenant scoping, soft deletes, text filtering, and both ordering policies.
#[derive(Default)]
pub struct InMemoryPlaceStore {
    pub rows: Mutex<Vec<Place>>,
    pub search_calls: Mutex<usize>,
    /// When set, `delete_by_ids` reports this figure instead of the real one.
    pub forced_delete_count: Option<u64>,
}

impl InMemoryPlaceStore {
    pub fn with_places(places: Vec<Place>) -> Self {
        Self {
            rows: Mutex::new(places),
            ..Default::default()
        }
    }

    pub fn live_rows(&self, company_id: Uuid) -> Vec<Place> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.company_id == company_id && p.deleted_at.is_none())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PlaceStore for InMemoryPlaceStore {
    async fn search(
        &self,
        company_id: Uuid,
        query: Option<&str>,
        ordering: PlaceOrdering,
        limit: Option<i64>,
    ) -> Result<Vec<Place>> {
        *self.search_calls.lock().unwrap() += 1;

        let mut rows: Vec<Place> = self
            .live_rows(company_id)
            .into_iter()
            .filter(|p| match query {
                Some(q) => p.name.to_lowercase().contains(&q.to_lowercase()),
                None => true,
            })
            .collect();

        match ordering {
            PlaceOrdering::DistanceFrom(point) => rows.sort_by(|a, b| {
                a.point()
                    .distance_meters(&point)
                    .partial_cmp(&b.point().distance_meters(&point))
                    .unwrap()
            }),
            PlaceOrdering::NameDescending => rows.sort_by(|a, b| b.name.cmp(&a.name)),
        }

        if let Some(limit) = limit {
            rows.truncate(limit as usize);
        }

        Ok(rows)
    }

    async fn find(&self, company_id: Uuid, id: Uuid) -> Result<Option<Place>> {
        Ok(self
            .live_rows(company_id)
            .into_iter()
            .find(|p| p.id == id))
    }

    async fn list_all(&self, company_id: Uuid) -> Result<Vec<Place>> {
        let mut rows = self.live_rows(company_id);
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert(&self, place: &Place) -> Result<()> {
        self.rows.lock().unwrap().push(place.clone());
        Ok(())
    }
}

#[async_trait]
impl BulkDeleteStore for InMemoryPlaceStore {
    fn resource_label(&self) -> &'static str {
        "places"
    }

    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64> {
        Ok(self
            .live_rows(company_id)
            .iter()
            .filter(|p| ids.contains(&p.id))
            .count() as i64)
    }

    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0u64;

        for row in rows.iter_mut() {
            if row.company_id == company_id && ids.contains(&row.id) && row.deleted_at.is_none() {
                row.deleted_at = Some(Utc::now());
                affected += 1;
            }
        }

        Ok(self.forced_delete_count.unwrap_or(affected))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeCall {
    Forward {
        query: String,
        near: Option<Point>,
    },
    Reverse {
        point: Point,
        hint: Option<String>,
    },
}

/// Scripted `Geocoder`: returns fixed results or a provider error, and
/// records every call for assertions.
#[derive(Default)]
pub struct FakeGeocoder {
    pub results: Vec<GeocodeResult>,
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<GeocodeCall>>,
}

impl FakeGeocoder {
    pub fn returning(results: Vec<GeocodeResult>) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<GeocodeCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self) -> fleetops_geocoding::Result<Vec<GeocodeResult>> {
        match &self.fail_with {
            Some(message) => Err(fleetops_geocoding::Error::Provider(message.clone())),
            None => Ok(self.results.clone()),
        }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn forward(
        &self,
        query: &str,
        near: Option<Point>,
    ) -> fleetops_geocoding::Result<Vec<GeocodeResult>> {
        self.calls.lock().unwrap().push(GeocodeCall::Forward {
            query: query.to_string(),
            near,
        });
        self.answer()
    }

    async fn reverse(
        &self,
        point: Point,
        hint: Option<&str>,
    ) -> fleetops_geocoding::Result<Vec<GeocodeResult>> {
        self.calls.lock().unwrap().push(GeocodeCall::Reverse {
            point,
            hint: hint.map(str::to_string),
        });
        self.answer()
    }
}

/// In-memory `VendorStore` with physical deletion, mirroring the Postgres
/// implementation's contract.
#[derive(Default)]
pub struct InMemoryVendorStore {
    pub rows: Mutex<Vec<Vendor>>,
}

#[async_trait]
impl VendorStore for InMemoryVendorStore {
    async fn insert(&self, vendor: &Vendor) -> Result<()> {
        self.rows.lock().unwrap().push(vendor.clone());
        Ok(())
    }

    async fn update(&self, vendor: &Vendor) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|v| v.company_id == vendor.company_id && v.id == vendor.id)
        {
            Some(existing) => {
                *existing = vendor.clone();
                Ok(())
            }
            None => Err(fleetops::Error::ResourceNotFound {
                resource_type: "Vendor".to_string(),
                id: vendor.public_id.clone(),
            }),
        }
    }

    async fn find_by_public_id(
        &self,
        company_id: Uuid,
        public_id: &str,
    ) -> Result<Option<Vendor>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.company_id == company_id && v.public_id == public_id)
            .cloned())
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<Vendor>> {
        let mut rows: Vec<Vendor> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.company_id == company_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[async_trait]
impl BulkDeleteStore for InMemoryVendorStore {
    fn resource_label(&self) -> &'static str {
        "vendors"
    }

    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.company_id == company_id && ids.contains(&v.id))
            .count() as i64)
    }

    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|v| !(v.company_id == company_id && ids.contains(&v.id)));
        Ok((before - rows.len()) as u64)
    }
}

/// In-memory `IntegratedVendorStore` with physical deletion.
#[derive(Default)]
pub struct InMemoryIntegratedVendorStore {
    pub rows: Mutex<Vec<IntegratedVendor>>,
}

#[async_trait]
impl IntegratedVendorStore for InMemoryIntegratedVendorStore {
    async fn insert(&self, vendor: &IntegratedVendor) -> Result<()> {
        self.rows.lock().unwrap().push(vendor.clone());
        Ok(())
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<IntegratedVendor>> {
        let mut rows: Vec<IntegratedVendor> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.company_id == company_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl BulkDeleteStore for InMemoryIntegratedVendorStore {
    fn resource_label(&self) -> &'static str {
        "integrated vendors"
    }

    async fn count_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<i64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.company_id == company_id && ids.contains(&v.id))
            .count() as i64)
    }

    async fn delete_by_ids(&self, company_id: Uuid, ids: &[Uuid]) -> Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|v| !(v.company_id == company_id && ids.contains(&v.id)));
        Ok((before - rows.len()) as u64)
    }
}

/// Collects audit events in memory for assertions.
#[derive(Default)]
pub struct MemoryAuditSink {
    pub events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn insert(&self, event: &AuditEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
