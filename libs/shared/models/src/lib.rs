pub mod error;
pub mod ids;
pub mod validation;

pub use error::AppError;
pub use ids::{AppointmentId, ClinicId, DoctorId, HospitalId};
pub use validation::ValidationError;
