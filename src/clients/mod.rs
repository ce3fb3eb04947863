/// External API clients module
use crate::config::{NasaConfig, ProviderConfig};
use crate::domain::{GeoPoint, Surface};
use crate::errors::{ApiError, ApiResult};
use crate::services::water::{ElevationProvider, PlaceClassifier, WaterFeatureSearch};
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Nominatim `type` values that denote a body of water
const WATER_PLACE_TYPES: [&str; 6] = ["lake", "river", "reservoir", "pond", "bay", "water"];

/// HTTP client wrapper with common configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Fail on non-success status, otherwise decode the JSON body
async fn json_body(resp: Response, provider: &str) -> ApiResult<Value> {
    if !resp.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "{} request failed with status {}",
            provider,
            resp.status()
        )));
    }
    Ok(resp.json().await?)
}

/// Google Maps Elevation API client
pub struct GoogleElevationClient {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleElevationClient {
    pub fn new(http_client: HttpClient, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.google_elevation_url.clone(),
            api_key: config.google_api_key.clone(),
        }
    }

    /// Fetch elevation for a single location
    pub async fn fetch_elevation(&self, point: GeoPoint) -> ApiResult<Option<f64>> {
        let Some(key) = &self.api_key else {
            debug!("no Google elevation key configured, skipping lookup");
            return Ok(None);
        };

        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("locations", format!("{},{}", point.lat, point.lon)),
                ("key", key.clone()),
            ])
            .send()
            .await?;

        let json = json_body(resp, "elevation").await?;
        parse_elevation(&json)
    }
}

/// Elevation of the first result; a non-OK status other than `ZERO_RESULTS` is an error
pub fn parse_elevation(json: &Value) -> ApiResult<Option<f64>> {
    match json.get("status").and_then(Value::as_str) {
        Some("OK") => Ok(json
            .get("results")
            .and_then(Value::as_array)
            .and_then(|r| r.first())
            .and_then(|r| r.get("elevation"))
            .and_then(Value::as_f64)),
        Some("ZERO_RESULTS") => Ok(None),
        Some(status) => Err(ApiError::Upstream(format!(
            "elevation status {}: {}",
            status,
            json.get("error_message")
                .and_then(Value::as_str)
                .unwrap_or("no message")
        ))),
        None => Err(ApiError::Upstream("elevation response without status".into())),
    }
}

impl ElevationProvider for GoogleElevationClient {
    fn elevation(&self, point: GeoPoint) -> impl Future<Output = ApiResult<Option<f64>>> + Send {
        self.fetch_elevation(point)
    }
}

/// OpenStreetMap Nominatim reverse geocoding client
pub struct NominatimClient {
    http_client: HttpClient,
    base_url: String,
}

impl NominatimClient {
    pub fn new(http_client: HttpClient, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.nominatim_url.clone(),
        }
    }

    /// Reverse geocode a point at city-level zoom
    pub async fn reverse(&self, point: GeoPoint) -> ApiResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
                ("zoom", "10".to_string()),
                ("addressdetails", "0".to_string()),
            ])
            .send()
            .await?;

        json_body(resp, "nominatim").await
    }

    pub async fn surface_at(&self, point: GeoPoint) -> ApiResult<Surface> {
        let json = self.reverse(point).await?;
        Ok(place_surface(&json))
    }
}

/// Reduce a Nominatim reverse geocoding payload to a surface class
pub fn place_surface(json: &Value) -> Surface {
    if json.get("error").is_some() {
        return Surface::Unknown;
    }

    let field = |k: &str| json.get(k).and_then(Value::as_str);
    let class = field("category").or_else(|| field("class"));
    let kind = field("type");

    if class == Some("water") {
        return Surface::Water;
    }
    if kind.is_some_and(|t| WATER_PLACE_TYPES.contains(&t)) {
        return Surface::Water;
    }
    if field("display_name").is_some_and(|n| n.to_lowercase().contains("lake")) {
        return Surface::Water;
    }
    if class.is_none() && kind.is_none() {
        return Surface::Unknown;
    }
    Surface::Land
}

impl PlaceClassifier for NominatimClient {
    fn classify_place(&self, point: GeoPoint) -> impl Future<Output = ApiResult<Surface>> + Send {
        self.surface_at(point)
    }
}

/// Overpass API client for OSM feature queries
pub struct OverpassClient {
    http_client: HttpClient,
    base_url: String,
    query_timeout_secs: u64,
}

impl OverpassClient {
    pub fn new(http_client: HttpClient, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.overpass_url.clone(),
            query_timeout_secs: config.timeout.as_secs().max(1),
        }
    }

    /// Count water ways and relations within `radius_m` of the point
    pub async fn count_water_features(&self, point: GeoPoint, radius_m: f64) -> ApiResult<u64> {
        let query = water_query(point, radius_m, self.query_timeout_secs);
        let resp = self
            .http_client
            .get_client()
            .post(&self.base_url)
            .body(query)
            .send()
            .await?;

        let json = json_body(resp, "overpass").await?;
        Ok(feature_count(&json))
    }

    pub async fn has_water_near(&self, point: GeoPoint, radius_m: f64) -> ApiResult<bool> {
        Ok(self.count_water_features(point, radius_m).await? > 0)
    }
}

/// Overpass QL for `natural=water` and any `water=*` ways or relations
pub fn water_query(point: GeoPoint, radius_m: f64, timeout_secs: u64) -> String {
    let around = format!("around:{},{},{}", radius_m.round(), point.lat, point.lon);
    format!(
        "[out:json][timeout:{timeout_secs}];\
         (way({around})[natural=water];\
         way({around})[water];\
         relation({around})[natural=water];\
         relation({around})[water];);\
         out count;"
    )
}

/// Total from an `out count` response, falling back to the element count
pub fn feature_count(json: &Value) -> u64 {
    let Some(elements) = json.get("elements").and_then(Value::as_array) else {
        return 0;
    };
    let counted = elements
        .iter()
        .find(|e| e.get("type").and_then(Value::as_str) == Some("count"))
        .and_then(|e| e.pointer("/tags/total"))
        .and_then(crate::utils::num);
    match counted {
        Some(total) => total.max(0.0) as u64,
        None => elements.len() as u64,
    }
}

impl WaterFeatureSearch for OverpassClient {
    fn has_water_features(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> impl Future<Output = ApiResult<bool>> + Send {
        self.has_water_near(point, radius_m)
    }
}

/// NASA NeoWs client
pub struct NasaClient {
    http_client: HttpClient,
    feed_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(http_client: HttpClient, config: &NasaConfig) -> Self {
        Self {
            http_client,
            feed_url: config.neo_feed_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch Near Earth Objects feed
    pub async fn fetch_neo_feed(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<Value> {
        let mut req = self.http_client.get_client().get(&self.feed_url).query(&[
            ("start_date", start.to_string()),
            ("end_date", end.to_string()),
        ]);

        if !self.api_key.is_empty() {
            req = req.query(&[("api_key", &self.api_key)]);
        }

        json_body(req.send().await?, "neo feed").await
    }
}
