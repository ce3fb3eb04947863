/// Business logic services layer
pub mod deflection;
pub mod tsunami;
pub mod water;

use crate::clients::NasaClient;
use crate::domain::{DiameterRange, GeoPoint, ImpactAssessment, NeoSummary, Surface, TsunamiInput};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{num, s_pick};
use chrono::{Days, NaiveDate, Utc};
use serde_json::Value;
use tracing::info;
use water::{ElevationProvider, PlaceClassifier, WaterClassifier, WaterFeatureSearch};

/// Longest date window the NeoWs feed accepts
const MAX_FEED_DAYS: u64 = 7;

/// Impact location assessment: water classification feeding the tsunami estimate
pub struct ImpactService<E, P, F> {
    classifier: WaterClassifier<E, P, F>,
}

impl<E, P, F> ImpactService<E, P, F>
where
    E: ElevationProvider,
    P: PlaceClassifier,
    F: WaterFeatureSearch,
{
    pub fn new(classifier: WaterClassifier<E, P, F>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &WaterClassifier<E, P, F> {
        &self.classifier
    }

    /// Classify the impact point and, over water, estimate the tsunami
    pub async fn assess(
        &self,
        point: GeoPoint,
        energy_megatons: f64,
        coupling_efficiency: Option<f64>,
    ) -> ImpactAssessment {
        let water = self.classifier.classify(point).await;

        let tsunami = (water.surface == Surface::Water).then(|| {
            let mut input = TsunamiInput::from_elevation(energy_megatons, water.elevation_m);
            if let Some(c) = coupling_efficiency {
                input = input.with_coupling(c);
            }
            tsunami::estimate_tsunami(input)
        });

        info!(
            lat = point.lat,
            lon = point.lon,
            surface = ?water.surface,
            damage = ?tsunami.as_ref().map(|t| t.damage_level),
            "impact assessed"
        );

        ImpactAssessment {
            point,
            energy_megatons,
            water,
            tsunami,
        }
    }
}

/// Near Earth Object feed service
pub struct NeoService {
    client: NasaClient,
}

impl NeoService {
    pub fn new(client: NasaClient) -> Self {
        Self { client }
    }

    /// List close approaches between `start` and `end`, defaulting to the coming week
    pub async fn list(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ApiResult<Vec<NeoSummary>> {
        let (start, end) = feed_window(start, end, Utc::now().date_naive())?;
        let feed = self.client.fetch_neo_feed(start, end).await?;
        let neos = flatten_feed(&feed);
        info!("NEO feed {}..{}: {} objects", start, end, neos.len());
        Ok(neos)
    }
}

/// Resolve the requested window against the feed's limits
fn feed_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> ApiResult<(NaiveDate, NaiveDate)> {
    let start = start.unwrap_or(today);
    let end = match end {
        Some(end) => end,
        None => start
            .checked_add_days(Days::new(MAX_FEED_DAYS))
            .ok_or_else(|| ApiError::InvalidInput("start_date out of range".into()))?,
    };

    if end < start {
        return Err(ApiError::InvalidInput(
            "end_date must not precede start_date".into(),
        ));
    }
    if (end - start).num_days() as u64 > MAX_FEED_DAYS {
        return Err(ApiError::InvalidInput(format!(
            "date range is limited to {} days",
            MAX_FEED_DAYS
        )));
    }
    Ok((start, end))
}

/// Flatten `near_earth_objects` (keyed by date) into summaries ordered by date
fn flatten_feed(feed: &Value) -> Vec<NeoSummary> {
    let Some(by_date) = feed.get("near_earth_objects").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut dates: Vec<&String> = by_date.keys().collect();
    dates.sort();

    dates
        .into_iter()
        .filter_map(|d| by_date.get(d).and_then(Value::as_array))
        .flatten()
        .filter_map(summarize_neo)
        .collect()
}

fn summarize_neo(neo: &Value) -> Option<NeoSummary> {
    let id = s_pick(neo, &["id", "neo_reference_id"])?;
    let name = s_pick(neo, &["name"]).unwrap_or_else(|| id.clone());

    let diameter = neo.pointer("/estimated_diameter/kilometers");
    let estimated_diameter_km = diameter.and_then(|d| {
        Some(DiameterRange {
            min: num(d.get("estimated_diameter_min")?)?,
            max: num(d.get("estimated_diameter_max")?)?,
        })
    });

    let approach = neo.pointer("/close_approach_data/0");
    let approach_num = |path: &str| approach.and_then(|a| a.pointer(path)).and_then(num);

    Some(NeoSummary {
        id,
        name,
        estimated_diameter_km,
        relative_velocity_kps: approach_num("/relative_velocity/kilometers_per_second"),
        miss_distance_km: approach_num("/miss_distance/kilometers"),
        absolute_magnitude: neo.get("absolute_magnitude_h").and_then(num),
        close_approach_date: approach.and_then(|a| s_pick(a, &["close_approach_date"])),
    })
}
