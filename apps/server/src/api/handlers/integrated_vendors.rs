//! Integrated vendor endpoints: supported listing, list, create, bulk delete

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::{
    api::handlers::{places::join_ids, BulkDeleteRequest},
    models::{supported_integrations, IntegratedVendor, IntegrationDescriptor},
    request_context::RequestContext,
    services::{bulk_delete, NewIntegratedVendor},
    state::AppState,
    Result,
};

/// The static set of provider integrations this deployment supports, each
/// serialized to its plain attribute form.
pub async fn supported(_ctx: RequestContext) -> Json<&'static [IntegrationDescriptor]> {
    Json(supported_integrations())
}

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<IntegratedVendor>>> {
    let vendors = state.integrated_vendor_service.list(&ctx).await?;
    Ok(Json(vendors))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<NewIntegratedVendor>,
) -> Result<(StatusCode, Json<IntegratedVendor>)> {
    let vendor = state.integrated_vendor_service.create(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

pub async fn bulk_delete_integrated_vendors(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<serde_json::Value>> {
    let outcome = bulk_delete(
        state.integrated_vendor_store.as_ref(),
        ctx.company_id,
        &request.ids,
    )
    .await?;

    state
        .audit_service
        .record(
            &ctx,
            "integrated_vendor.bulk_deleted",
            "integrated_vendor",
            &join_ids(&request.ids),
        )
        .await?;

    Ok(Json(json!({
        "status": "OK",
        "message": outcome.message(),
    })))
}
