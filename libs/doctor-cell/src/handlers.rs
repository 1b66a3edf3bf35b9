use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::SharedStore;
use shared_models::error::AppError;

use crate::models::{Doctor, DoctorListQuery};
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(store): State<SharedStore>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctor_service = DoctorService::new(store);

    let doctors = doctor_service.list_doctors(query).await?;

    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(store): State<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let doctor_service = DoctorService::new(store);

    let id = doctor_service.create_from_json(payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
