use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::SharedStore;
use shared_models::error::AppError;

use crate::models::Hospital;
use crate::services::HospitalService;

#[axum::debug_handler]
pub async fn list_hospitals(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Hospital>>, AppError> {
    let service = HospitalService::new(store);

    let hospitals = service.list_hospitals().await?;

    Ok(Json(hospitals))
}

#[axum::debug_handler]
pub async fn create_hospital(
    State(store): State<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let service = HospitalService::new(store);

    let id = service.create_from_json(payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
