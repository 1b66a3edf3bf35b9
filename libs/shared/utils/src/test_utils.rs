use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_database::{MemoryStore, SharedStore};

/// A fresh in-memory store, returned both concretely (for `count`) and as
/// the shared handle routers take.
pub fn memory_store() -> (Arc<MemoryStore>, SharedStore) {
    let store = Arc::new(MemoryStore::new());
    let shared: SharedStore = store.clone();
    (store, shared)
}

/// Sends one request through a router and returns the status and JSON body
/// (`Value::Null` for an empty body).
pub async fn send_json(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(body) => send_raw(router, method, uri, Some("application/json"), body.to_string()).await,
        None => send_raw(router, method, uri, None, String::new()).await,
    }
}

/// Like `send_json`, but with an arbitrary body and optional content type.
pub async fn send_raw(
    router: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).expect("valid test request");

    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };

    (status, json)
}

pub struct Fixtures;

impl Fixtures {
    pub fn hospital() -> Value {
        json!({
            "name": "Al Shifa Hospital",
            "city": "Riyadh",
            "address": "Olaya District, Street 10",
            "phone": "+966500000001"
        })
    }

    pub fn clinic(hospital_id: &str) -> Value {
        json!({
            "hospital_id": hospital_id,
            "name": "Internal Medicine",
            "specialties": ["internal medicine", "diabetes"]
        })
    }

    pub fn doctor(clinic_id: &str) -> Value {
        json!({
            "clinic_id": clinic_id,
            "name": "Dr. Ahmed Salem",
            "specialty": "internal medicine",
            "days_available": ["Sat", "Mon", "Wed"],
            "time_slots": ["09:00", "09:30", "10:00", "10:30", "11:00"]
        })
    }

    pub fn appointment(doctor_id: &str, date: &str, time_slot: &str) -> Value {
        json!({
            "patient_name": "Mona Ali",
            "patient_phone": "+966500000009",
            "doctor_id": doctor_id,
            "date": date,
            "time_slot": time_slot
        })
    }
}
