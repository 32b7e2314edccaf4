pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers::handle_assist;
use crate::profiles::handlers::{handle_get_profile, handle_list_profiles};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Writing assistant
        .route("/api/writing/assist", post(handle_assist))
        // Profile store (read-only)
        .route("/api/v1/profiles", get(handle_list_profiles))
        .route("/api/v1/profiles/:id", get(handle_get_profile))
        .with_state(state)
}
