use serde_json::Value;
use tracing::{debug, info};

use shared_database::{to_document, Filter, SharedStore, StoreError};
use shared_models::ids::{ClinicId, DoctorId};
use shared_utils::validation::decode_body;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, DoctorListQuery, DOCTOR_COLLECTION};

pub struct DoctorService {
    store: SharedStore,
}

impl DoctorService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn create_from_json(&self, payload: Value) -> Result<DoctorId, DoctorError> {
        let request: CreateDoctorRequest = decode_body(payload)?;
        self.create_doctor(request).await
    }

    /// Create a new doctor profile
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<DoctorId, DoctorError> {
        let doctor = request.validate()?;
        debug!("Creating doctor profile for {} in clinic {}", doctor.name, doctor.clinic_id);

        let document = to_document(DOCTOR_COLLECTION, &doctor)?;
        let id = self.store.insert(DOCTOR_COLLECTION, document).await?;

        let id: DoctorId = id.parse().map_err(|_| StoreError::Decode {
            collection: DOCTOR_COLLECTION.to_string(),
            message: format!("store returned a malformed identifier '{}'", id),
        })?;

        info!("Doctor profile created successfully with ID: {}", id);
        Ok(id)
    }

    /// Search doctors by clinic and/or specialty
    pub async fn list_doctors(&self, query: DoctorListQuery) -> Result<Vec<Doctor>, DoctorError> {
        let clinic_id = query.clinic_id.as_deref().map(ClinicId::filter_value);
        let filter = Filter::new()
            .eq_opt("clinic_id", clinic_id.as_deref())
            .eq_opt("specialty", query.specialty.as_deref());
        debug!("Searching doctors with filter: {:?}", filter);

        let documents = self.store.query(DOCTOR_COLLECTION, &filter).await?;

        let doctors = documents
            .into_iter()
            .map(|document| document.decode(DOCTOR_COLLECTION))
            .collect::<Result<Vec<Doctor>, _>>()?;

        Ok(doctors)
    }
}
