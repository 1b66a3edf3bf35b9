use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;
use shared_models::ids::{ClinicId, HospitalId};
use shared_models::validation::ValidationError;
use shared_utils::validation::{require_each, require_text};

pub const CLINIC_COLLECTION: &str = "clinic";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: ClinicId,
    pub hospital_id: HospitalId,
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClinicRequest {
    pub hospital_id: String,
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// A validated clinic. `hospital_id` is well formed but may name a
/// hospital that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClinic {
    pub hospital_id: HospitalId,
    pub name: String,
    pub specialties: Vec<String>,
}

impl CreateClinicRequest {
    pub fn validate(self) -> Result<NewClinic, ValidationError> {
        let name = require_text("name", self.name)?;
        let specialties = require_each("specialties", self.specialties)?;
        let hospital_id = HospitalId::from_reference("hospital_id", &self.hospital_id)?;

        Ok(NewClinic {
            hospital_id,
            name,
            specialties,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClinicListQuery {
    pub hospital_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClinicError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        match err {
            ClinicError::Validation(e) => e.into(),
            ClinicError::Store(e) => e.into(),
        }
    }
}
