use serde_json::Value;
use tracing::{debug, info, warn};

use shared_database::{to_document, Filter, SharedStore, StoreError};
use shared_models::ids::{AppointmentId, DoctorId};
use shared_utils::validation::{date_filter, decode_body};

use crate::models::{
    Appointment, AppointmentError, AppointmentListQuery, BookAppointmentRequest,
    BookedAppointment, APPOINTMENT_COLLECTION,
};
use crate::services::conflict::SlotConflictService;

pub struct AppointmentBookingService {
    store: SharedStore,
    conflict_service: SlotConflictService,
}

impl AppointmentBookingService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            conflict_service: SlotConflictService::new(store.clone()),
            store,
        }
    }

    pub async fn book_from_json(&self, payload: Value) -> Result<BookedAppointment, AppointmentError> {
        let request: BookAppointmentRequest = decode_body(payload)?;
        self.book_appointment(request).await
    }

    /// Books a slot. The lookup rejects known duplicates early; the store's
    /// unique index settles concurrent bookings of the same slot.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<BookedAppointment, AppointmentError> {
        let appointment = request.validate()?;
        let slot = appointment.slot();
        debug!("Booking appointment for {}", slot);

        if self.conflict_service.is_slot_taken(&slot).await? {
            return Err(AppointmentError::SlotConflict(slot));
        }

        let document = to_document(APPOINTMENT_COLLECTION, &appointment)?;

        let id = match self.store.insert(APPOINTMENT_COLLECTION, document).await {
            Ok(id) => id,
            Err(StoreError::UniqueViolation { .. }) => {
                warn!("Lost booking race for {}", slot);
                return Err(AppointmentError::SlotConflict(slot));
            }
            Err(e) => return Err(e.into()),
        };

        let id: AppointmentId = id.parse().map_err(|_| StoreError::Decode {
            collection: APPOINTMENT_COLLECTION.to_string(),
            message: format!("store returned a malformed identifier '{}'", id),
        })?;

        info!("Appointment {} booked for {}", id, slot);

        Ok(BookedAppointment {
            id,
            status: appointment.status,
        })
    }

    pub async fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let doctor_id = query.doctor_id.as_deref().map(DoctorId::filter_value);
        let date = query.date.as_deref().map(date_filter);
        let filter = Filter::new()
            .eq_opt("doctor_id", doctor_id.as_deref())
            .eq_opt("date", date.as_deref());
        debug!("Listing appointments with filter: {:?}", filter);

        let documents = self.store.query(APPOINTMENT_COLLECTION, &filter).await?;

        let appointments = documents
            .into_iter()
            .map(|document| document.decode(APPOINTMENT_COLLECTION))
            .collect::<Result<Vec<Appointment>, _>>()?;

        Ok(appointments)
    }
}
