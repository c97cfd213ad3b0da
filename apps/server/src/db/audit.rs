//! Audit event persistence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub company_id: Uuid,
    pub actor: Option<Uuid>,
    pub action: String,
    pub subject_type: String,
    pub subject_id: String,
    pub recorded_at: DateTime<Utc>,
}

/// Destination for audit events.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn insert(&self, event: &AuditEvent) -> Result<()>;
}

#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for AuditRepository {
    async fn insert(&self, event: &AuditEvent) -> Result<()> {
        sqlx::query(
            "INSERT INTO audit_events \
               (id, company_id, actor, action, subject_type, subject_id, recorded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(Uuid::new_v4())
        .bind(event.company_id)
        .bind(event.actor)
        .bind(&event.action)
        .bind(&event.subject_type)
        .bind(&event.subject_id)
        .bind(event.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }
}
