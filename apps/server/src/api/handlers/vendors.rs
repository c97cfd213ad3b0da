//! Vendor endpoints: list, create, update, bulk delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::{
    api::handlers::{places::join_ids, validated, BulkDeleteRequest},
    models::VendorResponse,
    request_context::RequestContext,
    services::{bulk_delete, NewVendor, VendorChanges},
    state::AppState,
    Result,
};

pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<VendorResponse>>> {
    let vendors = state.vendor_service.list(&ctx).await?;
    Ok(Json(vendors))
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<NewVendor>,
) -> Result<(StatusCode, Json<VendorResponse>)> {
    let input = validated(input)?;
    let vendor = state.vendor_service.create(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(public_id): Path<String>,
    Json(changes): Json<VendorChanges>,
) -> Result<Json<VendorResponse>> {
    let changes = validated(changes)?;
    let vendor = state
        .vendor_service
        .update(&ctx, &public_id, changes)
        .await?;
    Ok(Json(vendor))
}

pub async fn bulk_delete_vendors(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<serde_json::Value>> {
    let outcome = bulk_delete(
        state.vendor_store.as_ref(),
        ctx.company_id,
        &request.ids,
    )
    .await?;

    state
        .audit_service
        .record(&ctx, "vendor.bulk_deleted", "vendor", &join_ids(&request.ids))
        .await?;

    Ok(Json(json!({
        "status": "OK",
        "message": outcome.message(),
    })))
}
