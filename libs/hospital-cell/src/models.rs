use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;
use shared_models::ids::HospitalId;
use shared_models::validation::ValidationError;
use shared_utils::validation::require_text;

pub const HOSPITAL_COLLECTION: &str = "hospital";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateHospitalRequest {
    pub name: String,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A validated hospital, ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHospital {
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: Option<String>,
}

impl CreateHospitalRequest {
    pub fn validate(self) -> Result<NewHospital, ValidationError> {
        Ok(NewHospital {
            name: require_text("name", self.name)?,
            city: require_text("city", self.city)?,
            address: require_text("address", self.address)?,
            phone: self.phone,
        })
    }
}

#[derive(Debug, Error)]
pub enum HospitalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<HospitalError> for AppError {
    fn from(err: HospitalError) -> Self {
        match err {
            HospitalError::Validation(e) => e.into(),
            HospitalError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateHospitalRequest {
        CreateHospitalRequest {
            name: "Al Nada Hospital".to_string(),
            city: "Jeddah".to_string(),
            address: "Al Rawdah, King Road".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_validate_keeps_fields() {
        let hospital = request().validate().unwrap();
        assert_eq!(hospital.name, "Al Nada Hospital");
        assert_eq!(hospital.city, "Jeddah");
        assert_eq!(hospital.phone, None);
    }

    #[test]
    fn test_validate_rejects_blank_city() {
        let mut req = request();
        req.city = " ".to_string();
        assert_eq!(req.validate().unwrap_err(), ValidationError::MissingField("city"));
    }
}
