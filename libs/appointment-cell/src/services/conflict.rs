use tracing::{debug, info, warn};

use shared_database::SharedStore;

use crate::models::{AppointmentError, Slot, APPOINTMENT_COLLECTION, SLOT_FIELDS};

pub struct SlotConflictService {
    store: SharedStore,
}

impl SlotConflictService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Registers the (doctor_id, date, time_slot) uniqueness constraint with
    /// the store. Must run before the first booking is accepted.
    pub async fn install_slot_index(&self) -> Result<(), AppointmentError> {
        self.store
            .ensure_unique_index(APPOINTMENT_COLLECTION, &SLOT_FIELDS)
            .await?;

        info!(
            "Slot exclusivity enforced by {} store on {}",
            self.store.backend_name(),
            APPOINTMENT_COLLECTION
        );
        Ok(())
    }

    /// Check whether any appointment already holds the slot
    pub async fn is_slot_taken(&self, slot: &Slot) -> Result<bool, AppointmentError> {
        debug!("Checking conflicts for {}", slot);

        let existing = self.store
            .query(APPOINTMENT_COLLECTION, &slot.filter())
            .await?;

        if !existing.is_empty() {
            warn!("Conflict detected for {} - {} existing appointments", slot, existing.len());
        }

        Ok(!existing.is_empty())
    }
}
