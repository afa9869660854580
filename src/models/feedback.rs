use serde::Serialize;

use crate::error::LeadError;

pub const ERROR_TOAST_MS: u64 = 4000;

/// Client-side navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Home,
    Confirmation,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Confirmation => "/success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Error,
}

/// Transient notification shown in the corner of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub duration_ms: u64,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
            duration_ms: ERROR_TOAST_MS,
        }
    }
}

/// What the page should do once a submit attempt resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Navigate(Route),
    Notify(Toast),
}

impl From<Result<Route, LeadError>> for Feedback {
    fn from(result: Result<Route, LeadError>) -> Self {
        match result {
            Ok(route) => Feedback::Navigate(route),
            Err(err) => Feedback::Notify(Toast::error(err.user_message())),
        }
    }
}

/// Static page shown after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationView {
    pub title: &'static str,
    pub message: &'static str,
    pub continue_label: &'static str,
    pub continue_to: &'static str,
}

impl Default for ConfirmationView {
    fn default() -> Self {
        Self {
            title: "Successfully submitted!",
            message: "Thank you for signing up for our Waitlist! You'll get early access soon.",
            continue_label: "Continue exploring Medbankr ai",
            continue_to: Route::Home.path(),
        }
    }
}
