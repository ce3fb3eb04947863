/// Near-Earth-object impact and deflection estimator service
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod utils;

use crate::clients::{
    GoogleElevationClient, HttpClient, NasaClient, NominatimClient, OverpassClient,
};
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::water::WaterClassifier;
use crate::services::{ImpactService, NeoService};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");
    if config.providers.google_api_key.is_none() {
        warn!("GOOGLE_ELEVATION_API_KEY not set, water classification relies on OSM only");
    }

    // Initialize clients
    let http = HttpClient::new(config.providers.timeout, &config.providers.user_agent)?;
    let elevation_client = GoogleElevationClient::new(http.clone(), &config.providers);
    let nominatim_client = NominatimClient::new(http.clone(), &config.providers);
    let overpass_client = OverpassClient::new(http.clone(), &config.providers);
    let nasa_client = NasaClient::new(http, &config.nasa);

    // Initialize services
    let classifier = WaterClassifier::new(
        elevation_client,
        nominatim_client,
        overpass_client,
        config.classifier.clone(),
    );
    let impact_service = Arc::new(ImpactService::new(classifier));
    let neo_service = Arc::new(NeoService::new(nasa_client));

    // Initialize application state
    let state = AppState {
        impact_service,
        neo_service,
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("neo_impact service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
