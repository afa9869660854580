use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// Local field names, as the landing page forms post them
pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const LOCATION: &str = "location";
pub const DESIGNATION: &str = "designation";
pub const FACILITY_TYPE: &str = "facilityType";
pub const HOSPITAL_NAME: &str = "hospitalName";
pub const HOSPITAL_ADDRESS: &str = "hospitalAddress";
pub const SPECIALIZATION: &str = "specialization";
pub const LAB_NAME: &str = "labName";
pub const LAB_ADDRESS: &str = "labAddress";

pub const WAITLIST_FIELDS: &[&str] = &[NAME, EMAIL, PHONE, LOCATION];

pub const PROVIDER_FIELDS: &[&str] = &[
    NAME,
    DESIGNATION,
    PHONE,
    EMAIL,
    FACILITY_TYPE,
    HOSPITAL_NAME,
    HOSPITAL_ADDRESS,
    SPECIALIZATION,
    LAB_NAME,
    LAB_ADDRESS,
];

/// Which of the two lead-capture forms a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Early-access waitlist for individual users
    Waitlist,
    /// Hospital or diagnostic centre registration
    Provider,
}

impl FormKind {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            FormKind::Waitlist => WAITLIST_FIELDS,
            FormKind::Provider => PROVIDER_FIELDS,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Waitlist => write!(f, "waitlist"),
            FormKind::Provider => write!(f, "provider"),
        }
    }
}

/// Current field values of one form instance.
///
/// A plain key-value store: no validation happens here, that is left to the
/// field policy at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    values: HashMap<String, String>,
}

impl FormState {
    /// Empty state with every field of `kind` present and blank.
    pub fn new(kind: FormKind) -> Self {
        let values = kind
            .fields()
            .iter()
            .map(|field| (field.to_string(), String::new()))
            .collect();
        Self { values }
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value of `name`, or the empty string for a field never set.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, `None` when blank.
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        let value = self.get(name).trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Restore every field of `kind` to empty, dropping anything else.
    pub fn reset(&mut self, kind: FormKind) {
        *self = FormState::new(kind);
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}
