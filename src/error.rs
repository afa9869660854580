use thiserror::Error;

/// Errors raised while building or sending a lead submission.
///
/// None of these are fatal: every failure leaves the form populated so the
/// visitor can correct it and submit again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    /// A required field is missing or malformed, or no facility type was
    /// chosen. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The remote API answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Request { status: u16 },

    /// The request could not be completed at all.
    #[error("network error: {0}")]
    Network(String),

    /// A submission for this form is still waiting on the remote API.
    #[error("Submission already in progress")]
    InFlight,
}

impl LeadError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeadError::Validation(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        LeadError::Validation(format!("Please fill in the {} field", field))
    }

    /// Message shown to the visitor in the error toast.
    pub fn user_message(&self) -> String {
        match self {
            LeadError::Validation(message) => message.clone(),
            LeadError::Request { .. } => format!("Failed to submit ({}). Please try again.", self),
            LeadError::Network(_) => "Failed to submit. Please try again.".to_string(),
            LeadError::InFlight => self.to_string(),
        }
    }
}
