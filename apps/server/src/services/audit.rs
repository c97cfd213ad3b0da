//! Audit event emission
//!
//! Mutations call [`AuditService::record`] explicitly at the point of
//! change, rather than hooking entity definitions.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    db::audit::{AuditEvent, AuditSink},
    request_context::RequestContext,
    Result,
};

pub struct AuditService {
    sink: Arc<dyn AuditSink>,
}

impl AuditService {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    pub async fn record(
        &self,
        ctx: &RequestContext,
        action: &str,
        subject_type: &str,
        subject_id: &str,
    ) -> Result<()> {
        tracing::info!(
            company_id = %ctx.company_id,
            actor = ?ctx.user_id,
            action,
            subject_type,
            subject_id,
            "audit"
        );

        self.sink
            .insert(&AuditEvent {
                company_id: ctx.company_id,
                actor: ctx.user_id,
                action: action.to_string(),
                subject_type: subject_type.to_string(),
                subject_id: subject_id.to_string(),
                recorded_at: Utc::now(),
            })
            .await
    }
}
