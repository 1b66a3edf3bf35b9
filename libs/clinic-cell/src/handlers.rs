use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::SharedStore;
use shared_models::error::AppError;

use crate::models::{Clinic, ClinicListQuery};
use crate::services::ClinicService;

#[axum::debug_handler]
pub async fn list_clinics(
    State(store): State<SharedStore>,
    Query(query): Query<ClinicListQuery>,
) -> Result<Json<Vec<Clinic>>, AppError> {
    let service = ClinicService::new(store);

    let clinics = service.list_clinics(query).await?;

    Ok(Json(clinics))
}

#[axum::debug_handler]
pub async fn create_clinic(
    State(store): State<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let service = ClinicService::new(store);

    // Only the hospital_id format is checked; the hospital may not exist.
    let id = service.create_from_json(payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}
