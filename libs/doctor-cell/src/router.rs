use axum::{
    Router,
    routing::get,
};

use shared_database::SharedStore;

use crate::handlers;

pub fn doctor_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .with_state(store)
}
