use axum::{
    Router,
    routing::get,
};

use shared_database::SharedStore;

use crate::handlers;

/// The slot index must already be installed on `store`; see
/// `SlotConflictService::install_slot_index`.
pub fn appointment_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::book_appointment))
        .with_state(store)
}
