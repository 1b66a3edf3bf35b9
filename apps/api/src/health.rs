use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use shared_database::{DocumentStore, SharedStore};

/// At most this many collection names are reported.
const MAX_LISTED_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize)]
pub struct StoreReport {
    pub backend: &'static str,
    pub connected: bool,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub backend: &'static str,
    pub status: &'static str,
    pub store: StoreReport,
}

/// Always answers 200; a store failure shows up as `status: "degraded"`.
#[axum::debug_handler]
pub async fn health_check(State(store): State<SharedStore>) -> Json<HealthReport> {
    let backend = store.backend_name();

    let report = match store.collections().await {
        Ok(mut collections) => {
            collections.truncate(MAX_LISTED_COLLECTIONS);
            StoreReport { backend, connected: true, collections, error: None }
        }
        Err(e) => {
            warn!("Store health check failed: {}", e);
            StoreReport { backend, connected: false, collections: Vec::new(), error: Some(e.to_string()) }
        }
    };

    Json(HealthReport {
        backend: "running",
        status: if report.connected { "ok" } else { "degraded" },
        store: report,
    })
}
