/// Application configuration module
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub nasa: NasaConfig,
    pub providers: ProviderConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Clone, Debug)]
pub struct NasaConfig {
    pub neo_feed_url: String,
    pub api_key: String,
}

/// Endpoints and credentials for the geodata providers
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub google_elevation_url: String,
    pub google_api_key: Option<String>,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

/// Tuning for the water classifier fallback chain
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    pub elevation_threshold_m: f64,
    pub nearby_radii_m: Vec<f64>,
    pub bearings_deg: Vec<f64>,
    pub feature_radius_m: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            elevation_threshold_m: 0.0,
            nearby_radii_m: vec![1000.0, 3000.0, 5000.0],
            bearings_deg: vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0],
            feature_radius_m: 200.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let nasa = NasaConfig {
            neo_feed_url: env::var("NASA_NEO_URL")
                .unwrap_or_else(|_| "https://api.nasa.gov/neo/rest/v1/feed".to_string()),
            api_key: env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string()),
        };

        let providers = ProviderConfig {
            google_elevation_url: env::var("GOOGLE_ELEVATION_URL").unwrap_or_else(|_| {
                "https://maps.googleapis.com/maps/api/elevation/json".to_string()
            }),
            google_api_key: env::var("GOOGLE_ELEVATION_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/reverse".to_string()),
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| "https://overpass-api.de/api/interpreter".to_string()),
            timeout: Duration::from_secs(env_u64("PROVIDER_TIMEOUT_SECONDS", 8)),
            user_agent: env::var("PROVIDER_USER_AGENT")
                .unwrap_or_else(|_| "neo-impact-service/1.0".to_string()),
        };

        let defaults = ClassifierConfig::default();
        let classifier = ClassifierConfig {
            elevation_threshold_m: env_f64("WATER_ELEVATION_THRESHOLD_M", 0.0),
            nearby_radii_m: env_f64_list("NEARBY_RADII_M").unwrap_or(defaults.nearby_radii_m),
            bearings_deg: env_f64_list("NEARBY_BEARINGS_DEG").unwrap_or(defaults.bearings_deg),
            feature_radius_m: env_f64("FEATURE_SEARCH_RADIUS_M", defaults.feature_radius_m),
        };

        Ok(Self {
            bind_addr,
            nasa,
            providers,
            classifier,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_f64_list(key: &str) -> Option<Vec<f64>> {
    env::var(key).ok().and_then(|s| parse_f64_list(&s))
}

/// Parse a comma separated list of numbers; `None` if empty or any entry is malformed
fn parse_f64_list(raw: &str) -> Option<Vec<f64>> {
    let values = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()?;
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
