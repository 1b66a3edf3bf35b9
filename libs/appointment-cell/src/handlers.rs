use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::SharedStore;
use shared_models::error::AppError;

use crate::models::{Appointment, AppointmentListQuery};
use crate::services::AppointmentBookingService;

#[axum::debug_handler]
pub async fn list_appointments(
    State(store): State<SharedStore>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let booking_service = AppointmentBookingService::new(store);

    let appointments = booking_service.list_appointments(query).await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(store): State<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(payload) = payload?;
    let booking_service = AppointmentBookingService::new(store);

    let booked = booking_service.book_from_json(payload).await?;

    Ok((StatusCode::CREATED, Json(json!(booked))))
}
