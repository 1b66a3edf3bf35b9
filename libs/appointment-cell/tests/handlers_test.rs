use axum::http::{Method, StatusCode};
use serde_json::json;

use appointment_cell::{appointment_routes, SlotConflictService, APPOINTMENT_COLLECTION};
use shared_database::SharedStore;
use shared_utils::test_utils::{memory_store, send_json, send_raw, Fixtures};

const DOCTOR_A: &str = "3c2b1a09-8f7e-4d6c-9b5a-493827161504";
const DOCTOR_B: &str = "7d6c5b4a-3928-4716-a5b4-c3d2e1f0a9b8";

async fn booking_store() -> (std::sync::Arc<shared_database::MemoryStore>, SharedStore) {
    let (memory, store) = memory_store();
    SlotConflictService::new(store.clone())
        .install_slot_index()
        .await
        .unwrap();
    (memory, store)
}

#[tokio::test]
async fn test_book_appointment_returns_pending() {
    let (_, store) = booking_store().await;

    let (status, body) = send_json(
        appointment_routes(store),
        Method::POST,
        "/",
        Some(Fixtures::appointment(DOCTOR_A, "2024-01-10", "09:00")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_supplied_status_is_overridden() {
    let (_, store) = booking_store().await;

    let mut request = Fixtures::appointment(DOCTOR_A, "2024-01-10", "10:00");
    request["status"] = json!("confirmed");

    let (status, body) = send_json(appointment_routes(store.clone()), Method::POST, "/", Some(request)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");

    let (_, listed) = send_json(appointment_routes(store), Method::GET, "/", None).await;
    assert_eq!(listed[0]["status"], "pending");
}

#[tokio::test]
async fn test_duplicate_slot_is_a_conflict() {
    let (memory, store) = booking_store().await;
    let request = Fixtures::appointment(DOCTOR_A, "2024-01-10", "09:00");

    let (first, _) = send_json(appointment_routes(store.clone()), Method::POST, "/", Some(request.clone())).await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = send_json(appointment_routes(store), Method::POST, "/", Some(request)).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already booked"));
    assert_eq!(memory.count(APPOINTMENT_COLLECTION).await, 1);
}

#[tokio::test]
async fn test_same_slot_different_doctor_or_day_is_allowed() {
    let (memory, store) = booking_store().await;

    let bookings = [
        Fixtures::appointment(DOCTOR_A, "2024-01-10", "09:00"),
        Fixtures::appointment(DOCTOR_B, "2024-01-10", "09:00"),
        Fixtures::appointment(DOCTOR_A, "2024-01-11", "09:00"),
        Fixtures::appointment(DOCTOR_A, "2024-01-10", "09:30"),
    ];

    for booking in bookings {
        let (status, _) = send_json(appointment_routes(store.clone()), Method::POST, "/", Some(booking)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    assert_eq!(memory.count(APPOINTMENT_COLLECTION).await, 4);
}

#[tokio::test]
async fn test_malformed_doctor_id_fails_before_insert() {
    let (memory, store) = booking_store().await;

    let (status, body) = send_json(
        appointment_routes(store),
        Method::POST,
        "/",
        Some(Fixtures::appointment("dr-who", "2024-01-10", "09:00")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("doctor_id"));
    assert_eq!(memory.count(APPOINTMENT_COLLECTION).await, 0);
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let (memory, store) = booking_store().await;

    let (status, _) = send_json(
        appointment_routes(store),
        Method::POST,
        "/",
        Some(Fixtures::appointment(DOCTOR_A, "2024-13-40", "09:00")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(memory.count(APPOINTMENT_COLLECTION).await, 0);
}

#[tokio::test]
async fn test_missing_patient_phone_is_rejected() {
    let (_, store) = booking_store().await;

    let (status, _) = send_json(
        appointment_routes(store),
        Method::POST,
        "/",
        Some(json!({
            "patient_name": "Mona Ali",
            "doctor_id": DOCTOR_A,
            "date": "2024-01-10",
            "time_slot": "09:00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_doctor_and_date() {
    let (_, store) = booking_store().await;

    let bookings = [
        (DOCTOR_A, "2024-01-10", "09:00"),
        (DOCTOR_A, "2024-01-10", "09:30"),
        (DOCTOR_A, "2024-01-11", "09:00"),
        (DOCTOR_B, "2024-01-10", "09:00"),
    ];
    for (doctor, date, slot) in bookings {
        let (status, _) = send_json(
            appointment_routes(store.clone()),
            Method::POST,
            "/",
            Some(Fixtures::appointment(doctor, date, slot)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/?doctor_id={}", DOCTOR_A);
    let (_, by_doctor) = send_json(appointment_routes(store.clone()), Method::GET, &uri, None).await;
    assert_eq!(by_doctor.as_array().unwrap().len(), 3);

    let (_, by_date) = send_json(appointment_routes(store.clone()), Method::GET, "/?date=2024-01-10", None).await;
    assert_eq!(by_date.as_array().unwrap().len(), 3);

    let uri = format!("/?doctor_id={}&date=2024-01-10", DOCTOR_A);
    let (_, both) = send_json(appointment_routes(store.clone()), Method::GET, &uri, None).await;
    let both = both.as_array().unwrap();
    assert_eq!(both.len(), 2);
    assert!(both.iter().all(|a| a["doctor_id"] == DOCTOR_A && a["date"] == "2024-01-10"));

    let (_, all) = send_json(appointment_routes(store), Method::GET, "/", None).await;
    assert_eq!(all.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_listed_appointment_shape() {
    let (_, store) = booking_store().await;

    let (_, created) = send_json(
        appointment_routes(store.clone()),
        Method::POST,
        "/",
        Some(Fixtures::appointment(DOCTOR_A, "2024-01-10", "09:00")),
    )
    .await;

    let (_, listed) = send_json(appointment_routes(store), Method::GET, "/", None).await;

    let mut expected = Fixtures::appointment(DOCTOR_A, "2024-01-10", "09:00");
    expected["id"] = created["id"].clone();
    expected["status"] = json!("pending");
    assert_eq!(listed, json!([expected]));
}

#[tokio::test]
async fn test_free_form_slot_token_is_booked_once() {
    let (memory, store) = booking_store().await;
    let request = Fixtures::appointment(DOCTOR_A, "2024-01-10", "10:30 AM");

    let (first, body) = send_json(appointment_routes(store.clone()), Method::POST, "/", Some(request.clone())).await;
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");

    let (second, _) = send_json(appointment_routes(store.clone()), Method::POST, "/", Some(request)).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(memory.count(APPOINTMENT_COLLECTION).await, 1);

    let (_, listed) = send_json(appointment_routes(store), Method::GET, "/", None).await;
    assert_eq!(listed[0]["time_slot"], "10:30 AM");
}

#[tokio::test]
async fn test_filters_accept_any_spelling_used_on_create() {
    let (_, store) = booking_store().await;
    let upper = DOCTOR_A.to_uppercase();

    let (status, _) = send_json(
        appointment_routes(store.clone()),
        Method::POST,
        "/",
        Some(Fixtures::appointment(&upper, "2024-1-10", "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/?doctor_id={}&date=2024-1-10", upper);
    let (_, listed) = send_json(appointment_routes(store.clone()), Method::GET, &uri, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let uri = format!("/?doctor_id={}&date=2024-01-10", DOCTOR_A);
    let (_, listed) = send_json(appointment_routes(store), Method::GET, &uri, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_json_body_gets_error_body() {
    let (memory, store) = booking_store().await;

    let (status, body) = send_raw(
        appointment_routes(store),
        Method::POST,
        "/",
        Some("application/json"),
        "patient_name=Mona".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(memory.count(APPOINTMENT_COLLECTION).await, 0);
}
