use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LeadError;

pub const SPECIALIZATIONS: &[&str] = &[
    "Cardiology",
    "Neurology",
    "Oncology",
    "Nephrology",
    "Orthopedics",
    "Gynecology",
    "Fertility",
    "Urology",
    "Others",
];

/// Facility type discriminator of the provider registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityType {
    Hospital,
    Diagnostic,
}

impl FacilityType {
    /// Parse the raw select value. The blank placeholder option maps to
    /// `Ok(None)`.
    pub fn from_field(value: &str) -> Result<Option<Self>, LeadError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for FacilityType {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hospital" => Ok(FacilityType::Hospital),
            "diagnostic" => Ok(FacilityType::Diagnostic),
            other => Err(LeadError::validation(format!(
                "Unknown facility type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityType::Hospital => write!(f, "hospital"),
            FacilityType::Diagnostic => write!(f, "diagnostic"),
        }
    }
}

/// Facility-specific part of a provider registration.
///
/// Only one shape can exist at a time, so lab fields can never leak into a
/// hospital registration or the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FacilityRegistration {
    Hospital {
        hospital_name: String,
        hospital_address: String,
        specialization: String,
    },
    Diagnostic {
        lab_name: String,
        lab_address: String,
        specialization: String,
    },
}

impl FacilityRegistration {
    pub fn facility_type(&self) -> FacilityType {
        match self {
            FacilityRegistration::Hospital { .. } => FacilityType::Hospital,
            FacilityRegistration::Diagnostic { .. } => FacilityType::Diagnostic,
        }
    }
}

pub fn is_known_specialization(value: &str) -> bool {
    SPECIALIZATIONS.contains(&value)
}
