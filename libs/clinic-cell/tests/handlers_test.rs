use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use serde_json::json;

use clinic_cell::{clinic_routes, ClinicError, ClinicListQuery, ClinicService, CLINIC_COLLECTION};
use shared_models::validation::ValidationError;
use shared_utils::test_utils::{memory_store, send_json, Fixtures};

const HOSPITAL_A: &str = "0b7f4f7e-5c1d-4a8b-9a51-6f3e2d1c0b9a";
const HOSPITAL_B: &str = "5e3a1c2b-7d4f-4e6a-8b9c-0d1e2f3a4b5c";

#[tokio::test]
async fn test_create_then_list_returns_input_fields() {
    let (_, store) = memory_store();

    let (status, created) = send_json(
        clinic_routes(store.clone()),
        Method::POST,
        "/",
        Some(Fixtures::clinic(HOSPITAL_A)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send_json(clinic_routes(store), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = Fixtures::clinic(HOSPITAL_A);
    expected["id"] = created["id"].clone();
    assert_eq!(listed, json!([expected]));
}

#[tokio::test]
async fn test_nonexistent_hospital_is_accepted() {
    let (memory, store) = memory_store();

    // No hospital has been created: references are format-checked only.
    let (status, _) = send_json(
        clinic_routes(store),
        Method::POST,
        "/",
        Some(Fixtures::clinic(HOSPITAL_B)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(memory.count(CLINIC_COLLECTION).await, 1);
}

#[tokio::test]
async fn test_malformed_hospital_id_fails_before_insert() {
    let (memory, store) = memory_store();

    let (status, body) = send_json(
        clinic_routes(store),
        Method::POST,
        "/",
        Some(Fixtures::clinic("not-a-hospital-id")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("hospital_id"));
    assert_eq!(memory.count(CLINIC_COLLECTION).await, 0);
}

#[tokio::test]
async fn test_list_filters_by_hospital() {
    let (_, store) = memory_store();

    for hospital in [HOSPITAL_A, HOSPITAL_B, HOSPITAL_A] {
        let (status, _) = send_json(
            clinic_routes(store.clone()),
            Method::POST,
            "/",
            Some(Fixtures::clinic(hospital)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("/?hospital_id={}", HOSPITAL_A);
    let (_, filtered) = send_json(clinic_routes(store.clone()), Method::GET, &uri, None).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|c| c["hospital_id"] == HOSPITAL_A));

    let (_, all) = send_json(clinic_routes(store.clone()), Method::GET, "/", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    // An empty parameter means no filter.
    let (_, blank) = send_json(clinic_routes(store), Method::GET, "/?hospital_id=", None).await;
    assert_eq!(blank.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_filter_with_unknown_hospital_is_empty() {
    let (_, store) = memory_store();
    let service = ClinicService::new(store);

    service.create_from_json(Fixtures::clinic(HOSPITAL_A)).await.unwrap();

    let clinics = service
        .list_clinics(ClinicListQuery { hospital_id: Some(HOSPITAL_B.to_string()) })
        .await
        .unwrap();
    assert!(clinics.is_empty());
}

#[tokio::test]
async fn test_service_reports_reference_error() {
    let (_, store) = memory_store();
    let service = ClinicService::new(store);

    let err = service
        .create_from_json(json!({"hospital_id": "123", "name": "Dental"}))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ClinicError::Validation(ValidationError::InvalidReference { field: "hospital_id", .. })
    );
}

#[tokio::test]
async fn test_uppercase_reference_is_found_by_same_filter() {
    let (_, store) = memory_store();
    let upper = HOSPITAL_A.to_uppercase();

    let (status, _) = send_json(
        clinic_routes(store.clone()),
        Method::POST,
        "/",
        Some(Fixtures::clinic(&upper)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/?hospital_id={}", upper);
    let (_, listed) = send_json(clinic_routes(store.clone()), Method::GET, &uri, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let uri = format!("/?hospital_id={}", HOSPITAL_A);
    let (_, listed) = send_json(clinic_routes(store), Method::GET, &uri, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["hospital_id"], HOSPITAL_A);
}
