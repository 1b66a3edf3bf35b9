use serde_json::Value;
use tracing::{debug, info};

use shared_database::{to_document, Filter, SharedStore, StoreError};
use shared_models::ids::HospitalId;
use shared_utils::validation::decode_body;

use crate::models::{CreateHospitalRequest, Hospital, HospitalError, HOSPITAL_COLLECTION};

pub struct HospitalService {
    store: SharedStore,
}

impl HospitalService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Validate a raw JSON body and create the hospital it describes.
    pub async fn create_from_json(&self, payload: Value) -> Result<HospitalId, HospitalError> {
        let request: CreateHospitalRequest = decode_body(payload)?;
        self.create_hospital(request).await
    }

    pub async fn create_hospital(&self, request: CreateHospitalRequest) -> Result<HospitalId, HospitalError> {
        let hospital = request.validate()?;
        debug!("Creating hospital: {}", hospital.name);

        let document = to_document(HOSPITAL_COLLECTION, &hospital)?;
        let id = self.store.insert(HOSPITAL_COLLECTION, document).await?;

        let id: HospitalId = id.parse().map_err(|_| StoreError::Decode {
            collection: HOSPITAL_COLLECTION.to_string(),
            message: format!("store returned a malformed identifier '{}'", id),
        })?;

        info!("Hospital created with ID: {}", id);
        Ok(id)
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, HospitalError> {
        let documents = self.store.query(HOSPITAL_COLLECTION, &Filter::new()).await?;
        debug!("Listing {} hospitals", documents.len());

        let hospitals = documents
            .into_iter()
            .map(|document| document.decode(HOSPITAL_COLLECTION))
            .collect::<Result<Vec<Hospital>, _>>()?;

        Ok(hospitals)
    }
}
