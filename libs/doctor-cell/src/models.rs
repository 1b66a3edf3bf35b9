use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;
use shared_models::ids::{ClinicId, DoctorId};
use shared_models::validation::ValidationError;
use shared_utils::validation::{parse_time_slots, require_each, require_text};

pub const DOCTOR_COLLECTION: &str = "doctor";

/// Half-hour grid from 09:00 to 14:30.
pub const DEFAULT_TIME_SLOTS: [&str; 12] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30",
    "12:00", "12:30", "13:00", "13:30", "14:00", "14:30",
];

pub fn default_time_slots() -> Vec<String> {
    DEFAULT_TIME_SLOTS.iter().map(|slot| slot.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub clinic_id: ClinicId,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub days_available: Vec<String>,
    #[serde(default)]
    pub time_slots: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctorRequest {
    pub clinic_id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub days_available: Vec<String>,
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDoctor {
    pub clinic_id: ClinicId,
    pub name: String,
    pub specialty: String,
    pub days_available: Vec<String>,
    pub time_slots: Vec<String>,
}

impl CreateDoctorRequest {
    pub fn validate(self) -> Result<NewDoctor, ValidationError> {
        let name = require_text("name", self.name)?;
        let specialty = require_text("specialty", self.specialty)?;
        let days_available = require_each("days_available", self.days_available)?;
        let time_slots = parse_time_slots("time_slots", &self.time_slots)?;
        let clinic_id = ClinicId::from_reference("clinic_id", &self.clinic_id)?;

        Ok(NewDoctor {
            clinic_id,
            name,
            specialty,
            days_available,
            time_slots,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DoctorListQuery {
    pub clinic_id: Option<String>,
    pub specialty: Option<String>,
}

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::Validation(e) => e.into(),
            DoctorError::Store(e) => e.into(),
        }
    }
}
