use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ValidationError;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses a reference field. Only the format is checked; the
            /// referenced record is never looked up.
            pub fn from_reference(field: &'static str, value: &str) -> Result<Self, ValidationError> {
                value.parse().map_err(|_| ValidationError::InvalidReference {
                    field,
                    value: value.to_string(),
                })
            }

            /// Canonical text of a reference used as a list filter, so any
            /// spelling accepted on create finds the stored record. Values
            /// that are not ids are kept as given and simply match nothing.
            pub fn filter_value(value: &str) -> String {
                value
                    .parse::<Self>()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|_| value.to_string())
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

resource_id!(
    /// Identifier of a document in the `hospital` collection.
    HospitalId
);
resource_id!(
    /// Identifier of a document in the `clinic` collection.
    ClinicId
);
resource_id!(
    /// Identifier of a document in the `doctor` collection.
    DoctorId
);
resource_id!(
    /// Identifier of a document in the `appointment` collection.
    AppointmentId
);
