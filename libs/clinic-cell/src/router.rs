use axum::{
    Router,
    routing::get,
};

use shared_database::SharedStore;

use crate::handlers;

pub fn clinic_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_clinics).post(handlers::create_clinic))
        .with_state(store)
}
