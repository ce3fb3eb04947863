//! Water/land classification over unreliable geodata providers.
//!
//! Three independent signals are consulted in a fixed order: surface elevation,
//! reverse geocoding, and, for apparent land near a shoreline, a ring of nearby
//! probes. A provider error is only ever "no signal"; the chain ends in
//! [`Surface::Unknown`] when nothing usable came back.

use crate::config::ClassifierConfig;
use crate::domain::{Evidence, GeoPoint, ProbeCheck, Surface, WaterStatus};
use crate::errors::ApiResult;
use crate::utils::offset_point;
use std::future::Future;
use tracing::{debug, warn};

/// Point elevation in metres; `Ok(None)` when the provider has no value
pub trait ElevationProvider: Send + Sync {
    fn elevation(&self, point: GeoPoint) -> impl Future<Output = ApiResult<Option<f64>>> + Send;
}

/// Reverse geocoding reduced to a surface class
pub trait PlaceClassifier: Send + Sync {
    fn classify_place(&self, point: GeoPoint) -> impl Future<Output = ApiResult<Surface>> + Send;
}

/// Presence of water-tagged map features within a radius
pub trait WaterFeatureSearch: Send + Sync {
    fn has_water_features(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> impl Future<Output = ApiResult<bool>> + Send;
}

pub struct WaterClassifier<E, P, F> {
    elevation: E,
    places: P,
    features: F,
    config: ClassifierConfig,
}

impl<E, P, F> WaterClassifier<E, P, F>
where
    E: ElevationProvider,
    P: PlaceClassifier,
    F: WaterFeatureSearch,
{
    pub fn new(elevation: E, places: P, features: F, config: ClassifierConfig) -> Self {
        Self {
            elevation,
            places,
            features,
            config,
        }
    }

    /// Classify with the configured elevation threshold
    pub async fn classify(&self, point: GeoPoint) -> WaterStatus {
        self.classify_water(point, self.config.elevation_threshold_m).await
    }

    pub async fn classify_water(&self, point: GeoPoint, threshold_m: f64) -> WaterStatus {
        let elevation = self.elevation_at(point).await;

        if let Some(elev) = elevation {
            if elev <= threshold_m {
                debug!(?point, elev, "water by elevation");
                return WaterStatus::new(Surface::Water, Some(elev), Some(Evidence::Elevation));
            }
        }

        if self.place_at(point).await == Surface::Water {
            debug!(?point, ?elevation, "water by reverse geocoding");
            return WaterStatus::new(Surface::Water, elevation, Some(Evidence::ReverseGeocode));
        }

        let Some(elev) = elevation else {
            debug!(?point, "no elevation and no water place, classification unknown");
            return WaterStatus::unknown();
        };

        match self.search_nearby(point).await {
            Some(hit) => {
                debug!(?point, evidence = ?hit.evidence, "water found nearby");
                WaterStatus::new(Surface::Water, hit.elevation_m, Some(hit.evidence))
            }
            None => {
                debug!(?point, elev, "land, no water nearby");
                WaterStatus::new(Surface::Land, Some(elev), Some(Evidence::Exhausted))
            }
        }
    }

    /// Probe around `origin` in canonical order; the first hit wins.
    ///
    /// Order: feature search at the origin, then every radius in turn and every
    /// bearing within it, each probe trying features, elevation, then geocoding.
    async fn search_nearby(&self, origin: GeoPoint) -> Option<NearbyHit> {
        let radius = self.config.feature_radius_m;

        if self.water_features_at(origin, radius).await {
            return Some(NearbyHit {
                elevation_m: None,
                evidence: Evidence::Nearby {
                    point: origin,
                    radius_m: 0.0,
                    bearing_deg: None,
                    check: ProbeCheck::WaterFeature,
                },
            });
        }

        for &radius_m in &self.config.nearby_radii_m {
            for &bearing in &self.config.bearings_deg {
                let probe = offset_point(origin, radius_m, bearing);
                let evidence = |check| Evidence::Nearby {
                    point: probe,
                    radius_m,
                    bearing_deg: Some(bearing),
                    check,
                };

                if self.water_features_at(probe, radius).await {
                    return Some(NearbyHit {
                        elevation_m: None,
                        evidence: evidence(ProbeCheck::WaterFeature),
                    });
                }

                let elevation = self.elevation_at(probe).await;
                if let Some(elev) = elevation.filter(|e| *e <= 0.0) {
                    return Some(NearbyHit {
                        elevation_m: Some(elev),
                        evidence: evidence(ProbeCheck::Elevation),
                    });
                }

                if self.place_at(probe).await == Surface::Water {
                    return Some(NearbyHit {
                        elevation_m: elevation,
                        evidence: evidence(ProbeCheck::ReverseGeocode),
                    });
                }
            }
        }

        None
    }

    async fn elevation_at(&self, point: GeoPoint) -> Option<f64> {
        match self.elevation.elevation(point).await {
            Ok(Some(e)) if e.is_finite() => Some(e),
            Ok(_) => None,
            Err(e) => {
                warn!(?point, error = %e, "elevation provider failed");
                None
            }
        }
    }

    async fn place_at(&self, point: GeoPoint) -> Surface {
        match self.places.classify_place(point).await {
            Ok(surface) => surface,
            Err(e) => {
                warn!(?point, error = %e, "reverse geocoding failed");
                Surface::Unknown
            }
        }
    }

    async fn water_features_at(&self, point: GeoPoint, radius_m: f64) -> bool {
        match self.features.has_water_features(point, radius_m).await {
            Ok(found) => found,
            Err(e) => {
                warn!(?point, error = %e, "water feature search failed");
                false
            }
        }
    }
}

struct NearbyHit {
    elevation_m: Option<f64>,
    evidence: Evidence,
}
