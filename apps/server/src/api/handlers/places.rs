//! Place endpoints: search, geocode, export, create, bulk delete

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use fleetops_geocoding::GeocodeResult;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::handlers::{validated, BulkDeleteRequest},
    models::Place,
    request_context::RequestContext,
    services::{bulk_delete, ExportFormat, SearchParams, SearchResult},
    state::AppState,
    Result,
};

/// Quick search of the tenant's places for selection, optionally augmented
/// with live geocoding results.
pub async fn search(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>> {
    let results = state
        .place_search_service
        .search(ctx.company_id, &params)
        .await?;

    Ok(Json(results))
}

/// Geocode-only lookup: no local search step.
pub async fn geocode(
    State(state): State<AppState>,
    _ctx: RequestContext,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<GeocodeResult>>> {
    let results = state.place_search_service.geocode(&params).await?;

    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// Download all of the tenant's places as a spreadsheet.
pub async fn export(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let format = match query.format.as_deref() {
        Some(requested) => ExportFormat::parse(requested)?,
        None => ExportFormat::parse(&state.config.export.default_format)?,
    };

    let export = state
        .export_service
        .export_places(ctx.company_id, format)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.bytes,
    )
        .into_response())
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewPlace {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub street1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: f64,
}

pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<NewPlace>,
) -> Result<(StatusCode, Json<Place>)> {
    let input = validated(input)?;

    let now = Utc::now();
    let place = Place {
        id: Uuid::new_v4(),
        public_id: Place::new_public_id(),
        company_id: ctx.company_id,
        name: input.name,
        street1: input.street1,
        city: input.city,
        country: input.country,
        latitude: input.latitude,
        longitude: input.longitude,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    state.place_store.insert(&place).await?;
    state
        .audit_service
        .record(&ctx, "place.created", "place", &place.public_id)
        .await?;

    Ok((StatusCode::CREATED, Json(place)))
}

pub async fn bulk_delete_places(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<serde_json::Value>> {
    let outcome = bulk_delete(
        state.place_store.as_ref(),
        ctx.company_id,
        &request.ids,
    )
    .await?;

    state
        .audit_service
        .record(&ctx, "place.bulk_deleted", "place", &join_ids(&request.ids))
        .await?;

    Ok(Json(json!({
        "status": "OK",
        "message": outcome.message(),
    })))
}

pub(crate) fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
