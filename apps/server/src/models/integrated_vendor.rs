//! Integrated vendors: third-party delivery providers connected per tenant

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A provider integration a company has connected. Credentials are stored
/// opaquely; this service never interprets them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IntegratedVendor {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub public_id: String,
    #[serde(skip_serializing)]
    pub company_id: Uuid,
    pub provider: String,
    #[serde(skip_serializing)]
    pub credentials: serde_json::Value,
    pub options: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl IntegratedVendor {
    pub fn new_public_id() -> String {
        super::generate_public_id("integrated_vendor")
    }
}

/// Descriptor of a provider this deployment can integrate with. Compiled in;
/// serialized to its plain attribute form by the supported listing.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationDescriptor {
    pub code: &'static str,
    pub name: &'static str,
    pub service_types: &'static [&'static str],
    pub credential_fields: &'static [&'static str],
}

/// The static registry of supported provider integrations.
pub fn supported_integrations() -> &'static [IntegrationDescriptor] {
    const SUPPORTED: &[IntegrationDescriptor] = &[
        IntegrationDescriptor {
            code: "lalamove",
            name: "Lalamove",
            service_types: &["on-demand", "scheduled"],
            credential_fields: &["api_key", "api_secret"],
        },
        IntegrationDescriptor {
            code: "gophr",
            name: "Gophr",
            service_types: &["on-demand"],
            credential_fields: &["api_key"],
        },
        IntegrationDescriptor {
            code: "dispatch_science",
            name: "Dispatch Science",
            service_types: &["scheduled"],
            credential_fields: &["client_id", "client_secret", "tenant"],
        },
    ];

    SUPPORTED
}
