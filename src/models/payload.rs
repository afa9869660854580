use serde::Serialize;

use crate::models::facility::{FacilityRegistration, FacilityType};

pub const DEFAULT_DESIGNATION: &str = "no-context";

/// Remote endpoints of the waitlist API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    WaitlistUser,
    WaitlistHospital,
    WaitlistDiagnostic,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::WaitlistUser => "/api/v1/waitlist/user",
            Endpoint::WaitlistHospital => "/api/v1/waitlist/hospital",
            Endpoint::WaitlistDiagnostic => "/api/v1/waitlist/diagnostic",
        }
    }
}

/// Contact details shared by every payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub full_name: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityPayload {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(flatten)]
    pub registration: FacilityRegistration,
}

/// API-shaped projection of a form, built once at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    Waitlist(Contact),
    Facility(FacilityPayload),
}

impl SubmissionPayload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SubmissionPayload::Waitlist(_) => Endpoint::WaitlistUser,
            SubmissionPayload::Facility(payload) => match payload.registration.facility_type() {
                FacilityType::Hospital => Endpoint::WaitlistHospital,
                FacilityType::Diagnostic => Endpoint::WaitlistDiagnostic,
            },
        }
    }

    pub fn contact(&self) -> &Contact {
        match self {
            SubmissionPayload::Waitlist(contact) => contact,
            SubmissionPayload::Facility(payload) => &payload.contact,
        }
    }
}
