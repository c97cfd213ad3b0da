//! Integrated vendor lifecycle: create and list

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::IntegratedVendorStore,
    models::{supported_integrations, IntegratedVendor},
    request_context::RequestContext,
    services::AuditService,
    Error, Result,
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewIntegratedVendor {
    pub provider: String,
    pub credentials: serde_json::Value,
    #[serde(default)]
    pub options: serde_json::Value,
}

pub struct IntegratedVendorService {
    store: Arc<dyn IntegratedVendorStore>,
    audit: Arc<AuditService>,
}

impl IntegratedVendorService {
    pub fn new(store: Arc<dyn IntegratedVendorStore>, audit: Arc<AuditService>) -> Self {
        Self { store, audit }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewIntegratedVendor,
    ) -> Result<IntegratedVendor> {
        if !supported_integrations()
            .iter()
            .any(|descriptor| descriptor.code == input.provider)
        {
            return Err(Error::Validation(format!(
                "unknown integration provider '{}'",
                input.provider
            )));
        }

        let vendor = IntegratedVendor {
            id: Uuid::new_v4(),
            public_id: IntegratedVendor::new_public_id(),
            company_id: ctx.company_id,
            provider: input.provider,
            credentials: input.credentials,
            options: input.options,
            created_at: Utc::now(),
        };

        self.store.insert(&vendor).await?;
        self.audit
            .record(ctx, "integrated_vendor.created", "integrated_vendor", &vendor.public_id)
            .await?;

        Ok(vendor)
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<IntegratedVendor>> {
        self.store.list(ctx.company_id).await
    }
}
