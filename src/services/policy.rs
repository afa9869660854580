use serde::Serialize;
use tracing::debug;

use crate::error::LeadError;
use crate::models::facility::{is_known_specialization, FacilityRegistration, FacilityType};
use crate::models::form::{
    FormKind, FormState, DESIGNATION, EMAIL, FACILITY_TYPE, HOSPITAL_ADDRESS, HOSPITAL_NAME,
    LAB_ADDRESS, LAB_NAME, LOCATION, NAME, PHONE, SPECIALIZATION,
};
use crate::models::payload::{Contact, FacilityPayload, SubmissionPayload, DEFAULT_DESIGNATION};

const WAITLIST_REQUIRED: &[&str] = &[NAME, EMAIL, PHONE];
const PROVIDER_COMMON: &[&str] = &[NAME, DESIGNATION, PHONE, EMAIL, FACILITY_TYPE];
const HOSPITAL_FIELDS: &[&str] = &[HOSPITAL_NAME, HOSPITAL_ADDRESS, SPECIALIZATION];
const DIAGNOSTIC_FIELDS: &[&str] = &[LAB_NAME, LAB_ADDRESS, SPECIALIZATION];

/// Fields a form currently renders and requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSet {
    pub visible: Vec<&'static str>,
    pub required: Vec<&'static str>,
}

/// Evaluate the field policy for the current form state.
///
/// Must be called again whenever the facility type changes. An unknown
/// facility type renders like the blank placeholder.
pub fn field_set(kind: FormKind, state: &FormState) -> FieldSet {
    match kind {
        FormKind::Waitlist => FieldSet {
            visible: vec![NAME, EMAIL, PHONE, LOCATION],
            required: WAITLIST_REQUIRED.to_vec(),
        },
        FormKind::Provider => {
            let mut fields = PROVIDER_COMMON.to_vec();
            match FacilityType::from_field(state.get(FACILITY_TYPE)) {
                Ok(Some(facility)) => fields.extend_from_slice(facility_fields(facility)),
                Ok(None) | Err(_) => {}
            }
            FieldSet {
                visible: fields.clone(),
                required: fields,
            }
        }
    }
}

pub fn facility_fields(facility: FacilityType) -> &'static [&'static str] {
    match facility {
        FacilityType::Hospital => HOSPITAL_FIELDS,
        FacilityType::Diagnostic => DIAGNOSTIC_FIELDS,
    }
}

/// Validate `state` and project it onto the API payload for `kind`.
///
/// Only the subset selected by the facility type is read; whatever the
/// other subset holds is ignored.
pub fn build_payload(kind: FormKind, state: &FormState) -> Result<SubmissionPayload, LeadError> {
    match kind {
        FormKind::Waitlist => {
            require_all(state, WAITLIST_REQUIRED)?;
            check_email(state.get(EMAIL))?;

            let designation = match state.non_blank(LOCATION) {
                Some(_) => state.get(LOCATION).to_string(),
                None => DEFAULT_DESIGNATION.to_string(),
            };

            Ok(SubmissionPayload::Waitlist(Contact {
                full_name: state.get(NAME).to_string(),
                designation,
                phone: state.get(PHONE).to_string(),
                email: state.get(EMAIL).to_string(),
            }))
        }
        FormKind::Provider => {
            let facility = FacilityType::from_field(state.get(FACILITY_TYPE))?
                .ok_or_else(|| LeadError::validation("Please select a facility type"))?;
            debug!("Provider form selected facility type: {}", facility);

            require_all(state, PROVIDER_COMMON)?;
            require_all(state, facility_fields(facility))?;
            check_email(state.get(EMAIL))?;

            let specialization = state.get(SPECIALIZATION).trim().to_string();
            if !is_known_specialization(&specialization) {
                return Err(LeadError::validation(format!(
                    "Unknown specialization: {}",
                    specialization
                )));
            }

            let registration = match facility {
                FacilityType::Hospital => FacilityRegistration::Hospital {
                    hospital_name: state.get(HOSPITAL_NAME).to_string(),
                    hospital_address: state.get(HOSPITAL_ADDRESS).to_string(),
                    specialization,
                },
                FacilityType::Diagnostic => FacilityRegistration::Diagnostic {
                    lab_name: state.get(LAB_NAME).to_string(),
                    lab_address: state.get(LAB_ADDRESS).to_string(),
                    specialization,
                },
            };

            Ok(SubmissionPayload::Facility(FacilityPayload {
                contact: Contact {
                    full_name: state.get(NAME).to_string(),
                    designation: state.get(DESIGNATION).to_string(),
                    phone: state.get(PHONE).to_string(),
                    email: state.get(EMAIL).to_string(),
                },
                registration,
            }))
        }
    }
}

fn require_all(state: &FormState, fields: &[&str]) -> Result<(), LeadError> {
    match fields.iter().find(|field| state.non_blank(field).is_none()) {
        Some(field) => Err(LeadError::missing_field(field)),
        None => Ok(()),
    }
}

// Same shape check a browser applies to `type=email` inputs
fn check_email(email: &str) -> Result<(), LeadError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(LeadError::validation("Please enter a valid email address"))
    }
}
