use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Filter, StoreError};
use shared_models::error::AppError;
use shared_models::ids::{AppointmentId, DoctorId};
use shared_models::validation::ValidationError;
use shared_utils::validation::{parse_date, parse_time_slot, require_text};

pub const APPOINTMENT_COLLECTION: &str = "appointment";

/// Fields that together identify a bookable slot. No two appointments may
/// agree on all of them.
pub const SLOT_FIELDS: [&str; 3] = ["doctor_id", "date", "time_slot"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_name: String,
    pub patient_phone: String,
    pub doctor_id: DoctorId,
    pub date: String,
    pub time_slot: String,
    pub status: AppointmentStatus,
}

/// Booking request body. A `status` sent by the caller is not part of the
/// contract and is dropped during decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_name: String,
    pub patient_phone: String,
    pub doctor_id: String,
    pub date: String,
    pub time_slot: String,
}

/// A doctor's slot on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub doctor_id: DoctorId,
    pub date: String,
    pub time_slot: String,
}

impl Slot {
    pub fn filter(&self) -> Filter {
        Filter::new()
            .eq("doctor_id", self.doctor_id.to_string())
            .eq("date", self.date.as_str())
            .eq("time_slot", self.time_slot.as_str())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doctor {} on {} at {}", self.doctor_id, self.date, self.time_slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub patient_name: String,
    pub patient_phone: String,
    pub doctor_id: DoctorId,
    pub date: String,
    pub time_slot: String,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    pub fn slot(&self) -> Slot {
        Slot {
            doctor_id: self.doctor_id,
            date: self.date.clone(),
            time_slot: self.time_slot.clone(),
        }
    }
}

impl BookAppointmentRequest {
    /// Every new appointment starts out pending.
    pub fn validate(self) -> Result<NewAppointment, ValidationError> {
        let patient_name = require_text("patient_name", self.patient_name)?;
        let patient_phone = require_text("patient_phone", self.patient_phone)?;
        let date = parse_date("date", &self.date)?;
        let time_slot = parse_time_slot("time_slot", &self.time_slot)?;
        let doctor_id = DoctorId::from_reference("doctor_id", &self.doctor_id)?;

        Ok(NewAppointment {
            patient_name,
            patient_phone,
            doctor_id,
            date,
            time_slot,
            status: AppointmentStatus::Pending,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedAppointment {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentListQuery {
    pub doctor_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("This slot is already booked: {0}")]
    SlotConflict(Slot),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Validation(e) => e.into(),
            AppointmentError::SlotConflict(slot) => {
                AppError::Conflict(format!("This slot is already booked: {}", slot))
            }
            AppointmentError::Store(e) => e.into(),
        }
    }
}
