use axum::{
    Router,
    routing::get,
};

use shared_database::SharedStore;

use crate::handlers;

pub fn hospital_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_hospitals).post(handlers::create_hospital))
        .with_state(store)
}
