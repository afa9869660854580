use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::error::LeadError;
use crate::models::feedback::{Feedback, Route};
use crate::models::form::{FormKind, FormState};
use crate::services::policy::{build_payload, field_set, FieldSet};
use crate::services::transport::LeadTransport;

/// One mounted lead-capture form: its field values plus the in-flight flag
/// that blocks a second submission while the first is pending.
pub struct FormSession {
    kind: FormKind,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
    created_at: DateTime<Utc>,
    last_touched: Mutex<DateTime<Utc>>,
}

// Clears the in-flight flag however the submission ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormSession {
    pub fn new(kind: FormKind) -> Self {
        let now = Utc::now();
        Self {
            kind,
            state: Mutex::new(FormState::new(kind)),
            in_flight: AtomicBool::new(false),
            created_at: now,
            last_touched: Mutex::new(now),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last edit or submit attempt.
    pub fn last_touched(&self) -> DateTime<Utc> {
        *self.last_touched.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        *self.last_touched.lock().unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, name: &str, value: &str) {
        debug!("Setting {} form field '{}'", self.kind, name);
        self.touch();
        self.lock_state().set_field(name, value);
    }

    pub fn snapshot(&self) -> FormState {
        self.lock_state().clone()
    }

    /// Fields to render and require for the current values.
    pub fn fields(&self) -> FieldSet {
        field_set(self.kind, &self.lock_state())
    }

    /// Run one submit attempt.
    ///
    /// On success the form is reset and the confirmation route returned. On
    /// failure the entered values are left untouched for a retry. A call
    /// made while another is pending fails with `InFlight` without touching
    /// the network.
    pub async fn submit(&self, transport: &dyn LeadTransport) -> Result<Route, LeadError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Ignoring {} submission: previous one still in flight", self.kind);
            return Err(LeadError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);
        self.touch();

        info!("Submitting {} form", self.kind);

        let snapshot = self.snapshot();
        let payload = build_payload(self.kind, &snapshot).map_err(|err| {
            warn!("Rejected {} form before sending: {}", self.kind, err);
            err
        })?;

        info!("Posting {} lead to {}", self.kind, payload.endpoint().path());
        if let Err(err) = transport.submit(&payload).await {
            error!("Submission of {} form failed: {}", self.kind, err);
            return Err(err);
        }

        self.lock_state().reset(self.kind);
        info!("Submission of {} form succeeded", self.kind);
        Ok(Route::Confirmation)
    }

    /// `submit`, folded into what the page should show next.
    pub async fn submit_with_feedback(&self, transport: &dyn LeadTransport) -> Feedback {
        Feedback::from(self.submit(transport).await)
    }
}
