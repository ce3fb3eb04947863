/// HTTP request handlers
use crate::clients::{GoogleElevationClient, NominatimClient, OverpassClient};
use crate::domain::{
    DeflectionInput, DeflectionResult, GeoPoint, Health, ImpactAssessment, LaunchVehicle,
    NeoSummary, SingleImpactorInput, SingleImpactorResult, VehiclePreset, WaterStatus,
};
use crate::errors::{ApiError, ApiResult};
use crate::services::deflection::{estimate_deflection, estimate_single_impactor};
use crate::services::{ImpactService, NeoService};
use crate::utils::num;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub type HttpImpactService = ImpactService<GoogleElevationClient, NominatimClient, OverpassClient>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub impact_service: Arc<HttpImpactService>,
    pub neo_service: Arc<NeoService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Serialize)]
pub struct NeoList {
    pub count: usize,
    pub neos: Vec<NeoSummary>,
}

#[derive(Serialize)]
pub struct VehicleList {
    pub vehicles: Vec<VehiclePreset>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Estimate a multi-launch kinetic impactor campaign
pub async fn deflect(
    Json(body): Json<Value>,
) -> Result<Json<SuccessResponse<DeflectionResult>>, ApiError> {
    let input = deflection_input(&body)?;
    Ok(Json(SuccessResponse::new(estimate_deflection(input))))
}

/// Estimate what a single impactor of known mass achieves
pub async fn deflect_single(
    Json(body): Json<Value>,
) -> Result<Json<SuccessResponse<SingleImpactorResult>>, ApiError> {
    let input = single_impactor_input(&body)?;
    Ok(Json(SuccessResponse::new(estimate_single_impactor(input))))
}

/// List launch vehicle presets
pub async fn vehicles() -> Json<SuccessResponse<VehicleList>> {
    Json(SuccessResponse::new(VehicleList {
        vehicles: LaunchVehicle::ALL.into_iter().map(VehiclePreset::from).collect(),
    }))
}

/// Classify a point as water, land or unknown
pub async fn water(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<WaterStatus>>, ApiError> {
    let point = geo_point(|k| params.get(k).map(|v| Value::from(v.as_str())))?;
    let classifier = state.impact_service.classifier();
    let status = match params.get("threshold") {
        Some(raw) => {
            let threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or_else(|| ApiError::InvalidInput("threshold must be a number".into()))?;
            classifier.classify_water(point, threshold).await
        }
        None => classifier.classify(point).await,
    };
    Ok(Json(SuccessResponse::new(status)))
}

/// Classify the impact point and estimate the tsunami if it is over water
pub async fn tsunami(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SuccessResponse<ImpactAssessment>>, ApiError> {
    let request = tsunami_request(&body)?;
    let assessment = state
        .impact_service
        .assess(request.point, request.energy_megatons, request.coupling_efficiency)
        .await;
    Ok(Json(SuccessResponse::new(assessment)))
}

/// Near Earth Objects for a date window (defaults to the next seven days)
pub async fn neo(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<NeoList>>, ApiError> {
    let start = date_param(&params, "start_date")?;
    let end = date_param(&params, "end_date")?;
    let neos = state.neo_service.list(start, end).await?;
    Ok(Json(SuccessResponse::new(NeoList {
        count: neos.len(),
        neos,
    })))
}

fn date_param(params: &HashMap<String, String>, key: &str) -> ApiResult<Option<NaiveDate>> {
    params
        .get(key)
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| ApiError::InvalidInput(format!("{} must be YYYY-MM-DD", key)))
        })
        .transpose()
}

/// Numeric field that may be absent; present but non-numeric is rejected
fn optional_number(body: &Value, key: &str) -> ApiResult<Option<f64>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => num(v)
            .filter(|x| x.is_finite())
            .map(Some)
            .ok_or_else(|| ApiError::InvalidInput(format!("{} must be a number", key))),
    }
}

fn required_number(body: &Value, key: &str) -> ApiResult<f64> {
    optional_number(body, key)?
        .ok_or_else(|| ApiError::InvalidInput(format!("{} is required", key)))
}

fn deflection_input(body: &Value) -> ApiResult<DeflectionInput> {
    let mut input = DeflectionInput::new(
        required_number(body, "diameter_m")?,
        required_number(body, "relative_velocity_m_s")?,
        required_number(body, "lead_time_days")?,
    );

    if let Some(name) = body.get("vehicle").and_then(Value::as_str) {
        let vehicle = LaunchVehicle::parse(name)
            .ok_or_else(|| ApiError::InvalidInput(format!("unknown vehicle '{}'", name)))?;
        input = input.with_vehicle(vehicle);
    }

    let overrides: [(&str, &mut f64); 6] = [
        ("distance_shift_m", &mut input.distance_shift_m),
        ("density_kg_m3", &mut input.density_kg_m3),
        ("impactor_velocity_m_s", &mut input.impactor_velocity_m_s),
        ("beta", &mut input.beta),
        ("cost_per_launch_usd", &mut input.cost_per_launch_usd),
        ("payload_per_launch_kg", &mut input.payload_per_launch_kg),
    ];
    for (key, slot) in overrides {
        if let Some(v) = optional_number(body, key)? {
            *slot = v;
        }
    }

    Ok(input)
}

fn single_impactor_input(body: &Value) -> ApiResult<SingleImpactorInput> {
    let mut input = SingleImpactorInput::new(
        required_number(body, "diameter_m")?,
        required_number(body, "lead_time_days")?,
    );

    let overrides: [(&str, &mut f64); 4] = [
        ("density_kg_m3", &mut input.density_kg_m3),
        ("impactor_mass_kg", &mut input.impactor_mass_kg),
        ("impactor_velocity_m_s", &mut input.impactor_velocity_m_s),
        ("beta", &mut input.beta),
    ];
    for (key, slot) in overrides {
        if let Some(v) = optional_number(body, key)? {
            *slot = v;
        }
    }

    Ok(input)
}

fn geo_point(get: impl Fn(&str) -> Option<Value>) -> ApiResult<GeoPoint> {
    let coord = |key: &str| -> ApiResult<f64> {
        match get(key) {
            None | Some(Value::Null) => Err(ApiError::InvalidInput(format!("{} is required", key))),
            Some(v) => num(&v)
                .filter(|x| x.is_finite())
                .ok_or_else(|| ApiError::InvalidInput(format!("{} must be a number", key))),
        }
    };
    let lat = coord("lat")?;
    let lon = coord("lon")?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::InvalidInput("lat must be within [-90, 90]".into()));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ApiError::InvalidInput("lon must be within [-180, 180]".into()));
    }
    Ok(GeoPoint::new(lat, lon))
}

struct TsunamiRequest {
    point: GeoPoint,
    energy_megatons: f64,
    coupling_efficiency: Option<f64>,
}

fn tsunami_request(body: &Value) -> ApiResult<TsunamiRequest> {
    let point = geo_point(|k| body.get(k).cloned())?;
    let energy_megatons = required_number(body, "energy_megatons")?;
    let coupling_efficiency = optional_number(body, "coupling_efficiency")?;

    if let Some(c) = coupling_efficiency {
        if !(0.0..=1.0).contains(&c) {
            return Err(ApiError::InvalidInput(
                "coupling_efficiency must be within [0, 1]".into(),
            ));
        }
    }

    Ok(TsunamiRequest {
        point,
        energy_megatons,
        coupling_efficiency,
    })
}
