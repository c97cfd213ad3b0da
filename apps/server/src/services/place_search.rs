//! Place search / geocode orchestration
//!
//! Merges the tenant's stored places with live results from the geocoding
//! provider. Local ordering is asymmetric by design: ascending distance when
//! the caller supplies a coordinate pair, otherwise descending by name.
//! Provider results are appended after local results in provider order, with
//! no re-ranking and no de-duplication. Any provider failure aborts the whole
//! call; local results are discarded rather than returned partially.

use std::sync::Arc;

use fleetops_geocoding::{GeocodeResult, Geocoder, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{PlaceOrdering, PlaceStore},
    models::Place,
    Result,
};

pub const DEFAULT_SEARCH_LIMIT: i64 = 30;

/// Query-string parameters of the search and geocode endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    /// Caps local results after ordering. Zero disables the cap.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// When set, augment local results with live geocoding.
    #[serde(default)]
    pub geo: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn default_limit() -> i64 {
    DEFAULT_SEARCH_LIMIT
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            limit: DEFAULT_SEARCH_LIMIT,
            geo: false,
            latitude: None,
            longitude: None,
        }
    }
}

impl SearchParams {
    /// The text query, with empty and whitespace-only strings treated the
    /// same as an absent one for every branching decision.
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// A coordinate pair counts as supplied only when both halves are
    /// present; a lone latitude or longitude is ignored.
    pub fn coordinates(&self) -> Option<Point> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Point::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn ordering(&self) -> PlaceOrdering {
        match self.coordinates() {
            Some(point) => PlaceOrdering::DistanceFrom(point),
            None => PlaceOrdering::NameDescending,
        }
    }

    fn effective_limit(&self) -> Option<i64> {
        (self.limit > 0).then_some(self.limit)
    }
}

/// One entry of the mixed search response: either a stored place or an
/// ephemeral geocoding candidate.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Place(Place),
    Geocoded(GeocodeResult),
}

pub struct PlaceSearchService {
    store: Arc<dyn PlaceStore>,
    geocoder: Arc<dyn Geocoder>,
}

impl PlaceSearchService {
    pub fn new(store: Arc<dyn PlaceStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Quick search of the tenant's places, optionally augmented with live
    /// geocoding results.
    pub async fn search(&self, company_id: Uuid, params: &SearchParams) -> Result<Vec<SearchResult>> {
        let local = self
            .store
            .search(
                company_id,
                params.text_query(),
                params.ordering(),
                params.effective_limit(),
            )
            .await?;

        let mut results: Vec<SearchResult> = local.into_iter().map(SearchResult::Place).collect();

        if params.geo {
            // All-or-nothing: a provider failure here throws away the local
            // results gathered above.
            let augmented = self.lookup(params).await?;
            results.extend(augmented.into_iter().map(SearchResult::Geocoded));
        }

        Ok(results)
    }

    /// Geocode-only entry point: same forward/reverse selection, no local
    /// search step.
    pub async fn geocode(&self, params: &SearchParams) -> Result<Vec<GeocodeResult>> {
        self.lookup(params).await
    }

    /// Forward when text is present (text takes precedence), reverse when
    /// only a coordinate pair is present, otherwise no provider call.
    async fn lookup(&self, params: &SearchParams) -> Result<Vec<GeocodeResult>> {
        if let Some(query) = params.text_query() {
            Ok(self.geocoder.forward(query, params.coordinates()).await?)
        } else if let Some(point) = params.coordinates() {
            // The raw query text (possibly empty) rides along as a hint.
            Ok(self.geocoder.reverse(point, params.query.as_deref()).await?)
        } else {
            Ok(Vec::new())
        }
    }
}
