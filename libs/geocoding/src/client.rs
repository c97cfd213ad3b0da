//! Nominatim-style geocoding client
//!
//! Speaks the public Nominatim HTTP API (`/search` and `/reverse` with
//! `format=jsonv2`). Self-hosted instances and commercial lookalikes expose
//! the same surface, so the base URL is configurable.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::models::{GeocodeResult, Point};

/// Degrees of padding around a bias point when building a forward-search
/// viewbox. Roughly a 50 km box at the equator.
const BIAS_VIEWBOX_PADDING_DEG: f64 = 0.5;

/// Abstract interface for forward and reverse geocoding.
///
/// The orchestration layer depends on this trait so provider failures and
/// result ordering can be exercised without network access.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Forward geocode: free-text query to candidate addresses, in provider
    /// order. `near` biases (but does not restrict) the search when present.
    async fn forward(&self, query: &str, near: Option<Point>) -> Result<Vec<GeocodeResult>>;

    /// Reverse geocode: coordinate to address candidates, in provider order.
    /// `hint` is passed through for providers that accept a query refinement;
    /// Nominatim ignores it.
    async fn reverse(&self, point: Point, hint: Option<&str>) -> Result<Vec<GeocodeResult>>;
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: Url,
    max_results: usize,
}

/// One entry of a `/search` response, or the body of a `/reverse` response.
/// Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimEntry {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    postcode: Option<String>,
}

/// Error body the provider returns with a 2xx status on bad reverse lookups.
#[derive(Debug, Deserialize)]
struct NominatimError {
    error: serde_json::Value,
}

impl NominatimClient {
    pub fn new(base_url: &str, user_agent: &str, timeout_seconds: u64, max_results: usize) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url,
            max_results,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint '{path}': {e}")))
    }

    async fn fetch_json(&self, url: Url) -> Result<serde_json::Value> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Provider(format!(
                "geocoding provider returned {status}: {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }

    fn convert(entry: NominatimEntry) -> Result<GeocodeResult> {
        let latitude: f64 = entry
            .lat
            .parse()
            .map_err(|_| Error::Decode(format!("bad latitude '{}'", entry.lat)))?;
        let longitude: f64 = entry
            .lon
            .parse()
            .map_err(|_| Error::Decode(format!("bad longitude '{}'", entry.lon)))?;

        let (country, postal_code) = match entry.address {
            Some(a) => (a.country, a.postcode),
            None => (None, None),
        };

        Ok(GeocodeResult {
            formatted_address: entry.display_name,
            latitude,
            longitude,
            country,
            postal_code,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn forward(&self, query: &str, near: Option<Point>) -> Result<Vec<GeocodeResult>> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("limit", &self.max_results.to_string());

        if let Some(point) = near {
            // Bias without restricting: viewbox around the point, unbounded.
            let viewbox = format!(
                "{},{},{},{}",
                point.longitude - BIAS_VIEWBOX_PADDING_DEG,
                point.latitude + BIAS_VIEWBOX_PADDING_DEG,
                point.longitude + BIAS_VIEWBOX_PADDING_DEG,
                point.latitude - BIAS_VIEWBOX_PADDING_DEG,
            );
            url.query_pairs_mut()
                .append_pair("viewbox", &viewbox)
                .append_pair("bounded", "0");
        }

        tracing::debug!(query, "forward geocoding");

        let body = self.fetch_json(url).await?;

        // A successful search returns a (possibly empty) array.
        let entries: Vec<NominatimEntry> =
            serde_json::from_value(body).map_err(|e| Error::Decode(e.to_string()))?;

        entries.into_iter().map(Self::convert).collect()
    }

    async fn reverse(&self, point: Point, hint: Option<&str>) -> Result<Vec<GeocodeResult>> {
        let mut url = self.endpoint("reverse")?;
        url.query_pairs_mut()
            .append_pair("lat", &point.latitude.to_string())
            .append_pair("lon", &point.longitude.to_string())
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1");

        tracing::debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            hint,
            "reverse geocoding"
        );

        let body = self.fetch_json(url).await?;

        // Reverse lookups report "nothing found" as an error object with
        // HTTP 200, not as an empty array.
        if let Ok(err) = serde_json::from_value::<NominatimError>(body.clone()) {
            return Err(Error::Provider(
                err.error
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.error.to_string()),
            ));
        }

        let entry: NominatimEntry =
            serde_json::from_value(body).map_err(|e| Error::Decode(e.to_string()))?;

        Ok(vec![Self::convert(entry)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_parses_string_coordinates() {
        let entry = NominatimEntry {
            display_name: "10 Downing Street, London".to_string(),
            lat: "51.5033".to_string(),
            lon: "-0.1276".to_string(),
            address: Some(NominatimAddress {
                country: Some("United Kingdom".to_string()),
                postcode: Some("SW1A 2AA".to_string()),
            }),
        };

        let result = NominatimClient::convert(entry).unwrap();
        assert_eq!(result.formatted_address, "10 Downing Street, London");
        assert!((result.latitude - 51.5033).abs() < 1e-9);
        assert!((result.longitude - -0.1276).abs() < 1e-9);
        assert_eq!(result.country.as_deref(), Some("United Kingdom"));
        assert_eq!(result.postal_code.as_deref(), Some("SW1A 2AA"));
    }

    #[test]
    fn convert_rejects_malformed_coordinates() {
        let entry = NominatimEntry {
            display_name: "nowhere".to_string(),
            lat: "not-a-number".to_string(),
            lon: "0".to_string(),
            address: None,
        };

        assert!(matches!(
            NominatimClient::convert(entry),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn client_rejects_invalid_base_url() {
        let client = NominatimClient::new("not a url", "fleetops-tests", 10, 5);
        assert!(matches!(client, Err(Error::Config(_))));
    }
}
