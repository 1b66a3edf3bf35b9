use axum::{
    Json, Router,
    routing::get,
};
use serde_json::{json, Value};

use appointment_cell::appointment_routes;
use clinic_cell::clinic_routes;
use doctor_cell::doctor_routes;
use hospital_cell::hospital_routes;
use shared_database::SharedStore;
use shared_models::error::AppError;

use crate::health::health_check;

async fn root() -> Json<Value> {
    Json(json!({"message": "Medical Booking Backend is running"}))
}

async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

pub fn create_router(store: SharedStore) -> Router {
    let health = Router::new()
        .route("/", get(health_check))
        .with_state(store.clone());

    Router::new()
        .route("/", get(root))
        .nest("/health", health)
        .nest("/hospitals", hospital_routes(store.clone()))
        .nest("/clinics", clinic_routes(store.clone()))
        .nest("/doctors", doctor_routes(store.clone()))
        .nest("/appointments", appointment_routes(store))
        .fallback(not_found)
}
