use serde_json::Value;
use tracing::{debug, info};

use shared_database::{to_document, Filter, SharedStore, StoreError};
use shared_models::ids::{ClinicId, HospitalId};
use shared_utils::validation::decode_body;

use crate::models::{Clinic, ClinicError, ClinicListQuery, CreateClinicRequest, CLINIC_COLLECTION};

pub struct ClinicService {
    store: SharedStore,
}

impl ClinicService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn create_from_json(&self, payload: Value) -> Result<ClinicId, ClinicError> {
        let request: CreateClinicRequest = decode_body(payload)?;
        self.create_clinic(request).await
    }

    pub async fn create_clinic(&self, request: CreateClinicRequest) -> Result<ClinicId, ClinicError> {
        let clinic = request.validate()?;
        debug!("Creating clinic {} for hospital {}", clinic.name, clinic.hospital_id);

        let document = to_document(CLINIC_COLLECTION, &clinic)?;
        let id = self.store.insert(CLINIC_COLLECTION, document).await?;

        let id: ClinicId = id.parse().map_err(|_| StoreError::Decode {
            collection: CLINIC_COLLECTION.to_string(),
            message: format!("store returned a malformed identifier '{}'", id),
        })?;

        info!("Clinic created with ID: {}", id);
        Ok(id)
    }

    pub async fn list_clinics(&self, query: ClinicListQuery) -> Result<Vec<Clinic>, ClinicError> {
        let hospital_id = query.hospital_id.as_deref().map(HospitalId::filter_value);
        let filter = Filter::new().eq_opt("hospital_id", hospital_id.as_deref());
        debug!("Listing clinics with filter: {:?}", filter);

        let documents = self.store.query(CLINIC_COLLECTION, &filter).await?;

        let clinics = documents
            .into_iter()
            .map(|document| document.decode(CLINIC_COLLECTION))
            .collect::<Result<Vec<Clinic>, _>>()?;

        Ok(clinics)
    }
}
