use std::sync::Arc;

use crate::assistant::dispatcher::Dispatcher;
use crate::profiles::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// Pluggable profile store. Default: PgProfileStore.
    pub profiles: Arc<dyn ProfileStore>,
}
