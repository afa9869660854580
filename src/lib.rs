//! Medbankr Lead Capture Service
//!
//! This library holds the lead-capture core of the Medbankr landing page
//! and a small web service that hosts the forms and forwards finished
//! submissions to the Medbankr waitlist API.
//!
//! # Modules
//!
//! - `models`: form state, facility registration, API payloads and feedback
//! - `services`: field policy, submission workflow and open form instances
//! - `client`: MedbankrClient, the reqwest transport to the waitlist API
//! - `handlers` / `routes`: the axum HTTP surface
//! - `ui`: modal overlay and voice check-in state machines
//!
//! # Forms
//!
//! Two forms exist: the early-access waitlist and the hospital / diagnostic
//! centre registration. A provider registration is either a hospital or a
//! diagnostic centre, never a mix, and only the selected half is sent.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod ui;

#[cfg(test)]
mod test_utils;

// Re-export the main API types for ease of use
pub use client::MedbankrClient;
pub use config::AppConfig;
pub use error::LeadError;
pub use handlers::api::AppState;
pub use models::form::{FormKind, FormState};
pub use routes::create_router;
pub use services::submission::FormSession;
pub use services::transport::LeadTransport;
