use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::StoredProfile;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<StoredProfile>,
}

/// GET /api/v1/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
) -> Result<Json<ProfileListResponse>, AppError> {
    let profiles = state.profiles.list_profiles().await?;
    Ok(Json(ProfileListResponse { profiles }))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredProfile>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation(format!("Invalid profile id: {id}")))?;

    let profile = state
        .profiles
        .get_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;

    Ok(Json(profile))
}
