use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::feedback::Toast;
use crate::models::form::{FormKind, FormState};
use crate::services::policy::FieldSet;

// Request body for opening a form
#[derive(Debug, Deserialize)]
pub struct CreateFormRequest {
    pub kind: FormKind,
}

// Request body for a single field edit
#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub name: String,
    pub value: String,
}

// Snapshot of a hosted form instance
#[derive(Debug, Serialize)]
pub struct FormView {
    pub id: String,
    pub kind: FormKind,
    pub state: FormState,
    pub fields: FieldSet,
    pub in_flight: bool,
    pub created_at: DateTime<Utc>,
}

// Response structure for submit endpoint
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}
