//! Axum route handler for the assist endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::warn;

use crate::assistant::dispatcher::Envelope;
use crate::assistant::request::WritingRequest;
use crate::state::AppState;

/// POST /api/writing/assist
///
/// Always answers 200. A body that fails to parse becomes an error envelope
/// rather than an extractor rejection status.
pub async fn handle_assist(
    State(state): State<AppState>,
    payload: Result<Json<WritingRequest>, JsonRejection>,
) -> Json<Envelope> {
    match payload {
        Ok(Json(request)) => Json(state.dispatcher.dispatch(request).await),
        Err(rejection) => {
            warn!("Rejected assist body: {rejection}");
            Json(Envelope::error(rejection.body_text()))
        }
    }
}
