/// Application routes configuration
use crate::handlers::{deflect, deflect_single, health, neo, tsunami, vehicles, water, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Kinetic impactor estimates
        .route("/deflect", post(deflect))
        .route("/deflect/single", post(deflect_single))
        .route("/vehicles", get(vehicles))
        // Impact site assessment
        .route("/water", get(water))
        .route("/tsunami", post(tsunami))
        // NASA NeoWs proxy
        .route("/neo", get(neo))
        .with_state(state)
}
