/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used as the default miss distance to achieve
pub const EARTH_RADIUS_M: f64 = 6_400_000.0;
pub const DEFAULT_DENSITY_KG_M3: f64 = 2700.0;
pub const DEFAULT_IMPACTOR_VELOCITY_M_S: f64 = 10_000.0;
pub const DEFAULT_BETA: f64 = 1.0;
/// DART spacecraft mass at impact
pub const DART_MASS_KG: f64 = 610.0;
pub const JOULES_PER_MEGATON: f64 = 4.184e15;
pub const DEFAULT_COUPLING_EFFICIENCY: f64 = 0.01;
pub const DEFAULT_WATER_DEPTH_M: f64 = 1000.0;

/// Heavy-lift launcher presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchVehicle {
    Falcon9,
    FalconHeavy,
    Sls,
}

impl LaunchVehicle {
    pub const ALL: [LaunchVehicle; 3] = [
        LaunchVehicle::Falcon9,
        LaunchVehicle::FalconHeavy,
        LaunchVehicle::Sls,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LaunchVehicle::Falcon9 => "Falcon 9",
            LaunchVehicle::FalconHeavy => "Falcon Heavy",
            LaunchVehicle::Sls => "SLS",
        }
    }

    pub fn payload_kg(self) -> f64 {
        match self {
            LaunchVehicle::Falcon9 => 22_800.0,
            LaunchVehicle::FalconHeavy => 63_800.0,
            LaunchVehicle::Sls => 31_000.0,
        }
    }

    pub fn cost_usd(self) -> f64 {
        match self {
            LaunchVehicle::Falcon9 => 50_000_000.0,
            LaunchVehicle::FalconHeavy => 150_000_000.0,
            LaunchVehicle::Sls => 200_000_000.0,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "falcon9" | "falcon_9" => Some(LaunchVehicle::Falcon9),
            "falconheavy" | "falcon_heavy" => Some(LaunchVehicle::FalconHeavy),
            "sls" => Some(LaunchVehicle::Sls),
            _ => None,
        }
    }
}

/// Launch vehicle preset as listed by the API
#[derive(Debug, Serialize)]
pub struct VehiclePreset {
    pub id: LaunchVehicle,
    pub label: &'static str,
    pub payload_kg: f64,
    pub cost_usd: f64,
}

impl From<LaunchVehicle> for VehiclePreset {
    fn from(v: LaunchVehicle) -> Self {
        Self {
            id: v,
            label: v.label(),
            payload_kg: v.payload_kg(),
            cost_usd: v.cost_usd(),
        }
    }
}

/// Kinetic impactor mission parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeflectionInput {
    pub diameter_m: f64,
    pub relative_velocity_m_s: f64,
    pub lead_time_days: f64,
    pub distance_shift_m: f64,
    pub density_kg_m3: f64,
    pub impactor_velocity_m_s: f64,
    pub beta: f64,
    pub cost_per_launch_usd: f64,
    pub payload_per_launch_kg: f64,
}

impl DeflectionInput {
    /// Required fields with every other parameter at its default
    pub fn new(diameter_m: f64, relative_velocity_m_s: f64, lead_time_days: f64) -> Self {
        Self {
            diameter_m,
            relative_velocity_m_s,
            lead_time_days,
            distance_shift_m: EARTH_RADIUS_M,
            density_kg_m3: DEFAULT_DENSITY_KG_M3,
            impactor_velocity_m_s: DEFAULT_IMPACTOR_VELOCITY_M_S,
            beta: DEFAULT_BETA,
            cost_per_launch_usd: LaunchVehicle::Falcon9.cost_usd(),
            payload_per_launch_kg: LaunchVehicle::Falcon9.payload_kg(),
        }
    }

    pub fn with_vehicle(mut self, vehicle: LaunchVehicle) -> Self {
        self.cost_per_launch_usd = vehicle.cost_usd();
        self.payload_per_launch_kg = vehicle.payload_kg();
        self
    }
}

/// Outcome of a kinetic impactor estimate.
///
/// Infinite values mean the mission cannot be flown with the given parameters;
/// they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeflectionResult {
    pub asteroid_mass_kg: f64,
    pub required_delta_v_m_s: f64,
    pub impactor_mass_kg: f64,
    pub launches_required: f64,
    pub estimated_cost_usd: f64,
    pub assumptions: DeflectionInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleImpactorInput {
    pub diameter_m: f64,
    pub lead_time_days: f64,
    pub density_kg_m3: f64,
    pub impactor_mass_kg: f64,
    pub impactor_velocity_m_s: f64,
    pub beta: f64,
}

impl SingleImpactorInput {
    pub fn new(diameter_m: f64, lead_time_days: f64) -> Self {
        Self {
            diameter_m,
            lead_time_days,
            density_kg_m3: DEFAULT_DENSITY_KG_M3,
            impactor_mass_kg: DART_MASS_KG,
            impactor_velocity_m_s: 11_000.0,
            beta: DEFAULT_BETA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleImpactorResult {
    pub asteroid_mass_kg: f64,
    pub achieved_delta_v_m_s: f64,
    pub lateral_shift_m: f64,
    pub assumptions: SingleImpactorInput,
}

/// WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Tri-state surface classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Water,
    Land,
    Unknown,
}

impl Surface {
    pub fn is_water(self) -> Option<bool> {
        match self {
            Surface::Water => Some(true),
            Surface::Land => Some(false),
            Surface::Unknown => None,
        }
    }
}

/// Which nearby check found water
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeCheck {
    WaterFeature,
    Elevation,
    ReverseGeocode,
}

/// Stage of the fallback chain that settled the classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Evidence {
    Elevation,
    ReverseGeocode,
    Nearby {
        point: GeoPoint,
        radius_m: f64,
        /// `None` for the check at the original point
        bearing_deg: Option<f64>,
        check: ProbeCheck,
    },
    /// Every nearby probe came back dry
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterStatus {
    pub surface: Surface,
    pub is_water: Option<bool>,
    pub elevation_m: Option<f64>,
    pub evidence: Option<Evidence>,
}

impl WaterStatus {
    pub fn new(surface: Surface, elevation_m: Option<f64>, evidence: Option<Evidence>) -> Self {
        Self {
            surface,
            is_water: surface.is_water(),
            elevation_m,
            evidence,
        }
    }

    pub fn unknown() -> Self {
        Self::new(Surface::Unknown, None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiInput {
    pub energy_megatons: f64,
    pub water_depth_m: f64,
    pub coupling_efficiency: f64,
}

impl TsunamiInput {
    pub fn new(energy_megatons: f64, water_depth_m: f64) -> Self {
        Self {
            energy_megatons,
            water_depth_m,
            coupling_efficiency: DEFAULT_COUPLING_EFFICIENCY,
        }
    }

    /// Derive the source depth from a surface elevation.
    ///
    /// Only a negative elevation is a usable depth; anything else falls back to
    /// [`DEFAULT_WATER_DEPTH_M`].
    pub fn from_elevation(energy_megatons: f64, elevation_m: Option<f64>) -> Self {
        let depth = match elevation_m {
            Some(e) if e < 0.0 => -e,
            _ => DEFAULT_WATER_DEPTH_M,
        };
        Self::new(energy_megatons, depth.max(1.0))
    }

    pub fn with_coupling(mut self, coupling_efficiency: f64) -> Self {
        self.coupling_efficiency = coupling_efficiency;
        self
    }
}

/// Ordered damage bands on shore wave height
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageLevel {
    Negligible,
    Minor,
    Moderate,
    Severe,
    Catastrophic,
}

impl DamageLevel {
    pub fn from_shore_height(height_m: f64) -> Self {
        if height_m >= 10.0 {
            DamageLevel::Catastrophic
        } else if height_m >= 3.0 {
            DamageLevel::Severe
        } else if height_m >= 1.0 {
            DamageLevel::Moderate
        } else if height_m >= 0.2 {
            DamageLevel::Minor
        } else {
            DamageLevel::Negligible
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiAssumptions {
    pub coupling_efficiency: f64,
    pub nearshore_depth_m: f64,
    pub water_depth_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiResult {
    pub initial_wave_height_m: f64,
    pub shore_wave_height_m: f64,
    pub wave_energy_megatons: f64,
    pub inundation_m: f64,
    pub damage_level: DamageLevel,
    pub coupled_energy_joules: f64,
    pub assumptions: TsunamiAssumptions,
}

/// Water classification plus tsunami estimate when the point is over water
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactAssessment {
    pub point: GeoPoint,
    pub energy_megatons: f64,
    pub water: WaterStatus,
    pub tsunami: Option<TsunamiResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiameterRange {
    pub min: f64,
    pub max: f64,
}

/// Flattened close approach entry from the NeoWs feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoSummary {
    pub id: String,
    pub name: String,
    pub estimated_diameter_km: Option<DiameterRange>,
    pub relative_velocity_kps: Option<f64>,
    pub miss_distance_km: Option<f64>,
    pub absolute_magnitude: Option<f64>,
    pub close_approach_date: Option<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
