//! Vendor lifecycle: create, update, list
//!
//! The slug is regenerated deterministically from the name on every save.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{PlaceStore, VendorStore},
    models::{Vendor, VendorResponse},
    request_context::RequestContext,
    services::AuditService,
    slug::slugify,
    Error, Result,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVendor {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(url(message = "website_url is invalid"))]
    pub website_url: Option<String>,
    pub place_id: Option<Uuid>,
    #[validate(url(message = "logo_url is invalid"))]
    pub logo_url: Option<String>,
    pub vendor_type: Option<String>,
    pub status: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VendorChanges {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(url(message = "website_url is invalid"))]
    pub website_url: Option<String>,
    pub place_id: Option<Uuid>,
    #[validate(url(message = "logo_url is invalid"))]
    pub logo_url: Option<String>,
    pub vendor_type: Option<String>,
    pub status: Option<String>,
}

pub struct VendorService {
    vendors: Arc<dyn VendorStore>,
    places: Arc<dyn PlaceStore>,
    audit: Arc<AuditService>,
}

impl VendorService {
    pub fn new(
        vendors: Arc<dyn VendorStore>,
        places: Arc<dyn PlaceStore>,
        audit: Arc<AuditService>,
    ) -> Self {
        Self {
            vendors,
            places,
            audit,
        }
    }

    pub async fn create(&self, ctx: &RequestContext, input: NewVendor) -> Result<VendorResponse> {
        let now = Utc::now();
        let vendor = Vendor {
            id: Uuid::new_v4(),
            public_id: Vendor::new_public_id(),
            company_id: ctx.company_id,
            slug: slugify(&input.name),
            name: input.name,
            email: input.email,
            phone: input.phone,
            website_url: input.website_url,
            place_id: input.place_id,
            logo_url: input.logo_url,
            vendor_type: input.vendor_type,
            status: input.status.unwrap_or_else(|| "active".to_string()),
            created_at: now,
            updated_at: now,
        };

        self.vendors.insert(&vendor).await?;
        self.audit
            .record(ctx, "vendor.created", "vendor", &vendor.public_id)
            .await?;

        self.into_response(ctx.company_id, vendor).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        public_id: &str,
        changes: VendorChanges,
    ) -> Result<VendorResponse> {
        let mut vendor = self
            .vendors
            .find_by_public_id(ctx.company_id, public_id)
            .await?
            .ok_or_else(|| Error::ResourceNotFound {
                resource_type: "Vendor".to_string(),
                id: public_id.to_string(),
            })?;

        if let Some(name) = changes.name {
            vendor.name = name;
        }
        if let Some(email) = changes.email {
            vendor.email = Some(email);
        }
        if let Some(phone) = changes.phone {
            vendor.phone = Some(phone);
        }
        if let Some(website_url) = changes.website_url {
            vendor.website_url = Some(website_url);
        }
        if let Some(place_id) = changes.place_id {
            vendor.place_id = Some(place_id);
        }
        if let Some(logo_url) = changes.logo_url {
            vendor.logo_url = Some(logo_url);
        }
        if let Some(vendor_type) = changes.vendor_type {
            vendor.vendor_type = Some(vendor_type);
        }
        if let Some(status) = changes.status {
            vendor.status = status;
        }

        // Slug always tracks the current name.
        vendor.slug = slugify(&vendor.name);
        vendor.updated_at = Utc::now();

        self.vendors.update(&vendor).await?;
        self.audit
            .record(ctx, "vendor.updated", "vendor", &vendor.public_id)
            .await?;

        self.into_response(ctx.company_id, vendor).await
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<VendorResponse>> {
        let vendors = self.vendors.list(ctx.company_id).await?;

        let mut responses = Vec::with_capacity(vendors.len());
        for vendor in vendors {
            responses.push(self.into_response(ctx.company_id, vendor).await?);
        }

        Ok(responses)
    }

    async fn into_response(&self, company_id: Uuid, vendor: Vendor) -> Result<VendorResponse> {
        let place = match vendor.place_id {
            Some(place_id) => self.places.find(company_id, place_id).await?,
            None => None,
        };

        Ok(vendor.to_response(place.as_ref()))
    }
}
