//! Vendor entity and its API representation

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::place::Place;

/// Shown whenever a vendor has no logo of its own.
pub const DEFAULT_VENDOR_LOGO_URL: &str =
    "https://assets.fleetops.dev/static/no-avatar.png";

#[derive(Debug, Clone, FromRow)]
pub struct Vendor {
    pub id: Uuid,
    pub public_id: String,
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub place_id: Option<Uuid>,
    pub logo_url: Option<String>,
    pub vendor_type: Option<String>,
    pub status: String,
    /// Regenerated deterministically from `name` on every save.
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vendor {
    pub fn new_public_id() -> String {
        super::generate_public_id("vendor")
    }

    /// Logo with an explicit default when the vendor has none.
    pub fn resolved_logo_url(&self) -> &str {
        self.logo_url.as_deref().unwrap_or(DEFAULT_VENDOR_LOGO_URL)
    }

    /// Address resolved from the referenced place; empty when absent.
    pub fn resolve_address(place: Option<&Place>) -> String {
        place.map(Place::address_line).unwrap_or_default()
    }

    /// API representation with the logo and address fallbacks applied.
    pub fn to_response(&self, place: Option<&Place>) -> VendorResponse {
        VendorResponse {
            public_id: self.public_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            website_url: self.website_url.clone(),
            logo_url: self.resolved_logo_url().to_string(),
            address: Self::resolve_address(place),
            vendor_type: self.vendor_type.clone(),
            status: self.status.clone(),
            slug: self.slug.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorResponse {
    pub public_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub logo_url: String,
    pub address: String,
    pub vendor_type: Option<String>,
    pub status: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
