//! Place entity: a named, geocoded address owned by one company

use chrono::{DateTime, Utc};
use fleetops_geocoding::Point;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A saved place. Soft-deleted rows (`deleted_at` set) are excluded from
/// every query; the column is retained for recovery and audit.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Place {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub public_id: String,
    #[serde(skip_serializing)]
    pub company_id: Uuid,
    pub name: String,
    pub street1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Place {
    pub fn point(&self) -> Point {
        Point::new(self.latitude, self.longitude)
    }

    pub fn new_public_id() -> String {
        super::generate_public_id("place")
    }

    /// Single-line address, skipping absent parts.
    pub fn address_line(&self) -> String {
        [
            self.street1.as_deref(),
            self.city.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}
