use axum::{
    extract::{Json as ExtractJson, Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::LeadError;
use crate::models::feedback::{ConfirmationView, Feedback, Toast};
use crate::models::response::{CreateFormRequest, FormView, SetFieldRequest, SubmitResponse};
use crate::services::sessions::{FormSessions, SessionLimits};
use crate::services::submission::FormSession;
use crate::services::transport::LeadTransport;

// AppState struct containing shared resources
pub struct AppState {
    pub transport: Arc<dyn LeadTransport>,
    pub sessions: FormSessions,
}

impl AppState {
    pub fn new(transport: Arc<dyn LeadTransport>) -> Self {
        Self::with_session_limits(transport, SessionLimits::default())
    }

    pub fn with_session_limits(transport: Arc<dyn LeadTransport>, limits: SessionLimits) -> Self {
        Self {
            transport,
            sessions: FormSessions::with_limits(limits),
        }
    }
}

fn form_view(id: String, session: &FormSession) -> FormView {
    FormView {
        id,
        kind: session.kind(),
        state: session.snapshot(),
        fields: session.fields(),
        in_flight: session.is_in_flight(),
        created_at: session.created_at(),
    }
}

fn find_session(state: &AppState, id: &str) -> Result<Arc<FormSession>, StatusCode> {
    state.sessions.get(id).ok_or_else(|| {
        warn!("No open form with id {}", id);
        StatusCode::NOT_FOUND
    })
}

fn error_status(err: &LeadError) -> StatusCode {
    match err {
        LeadError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LeadError::Request { .. } | LeadError::Network(_) => StatusCode::BAD_GATEWAY,
        LeadError::InFlight => StatusCode::CONFLICT,
    }
}

// Open a new, empty form instance
pub async fn open_form(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<CreateFormRequest>,
) -> Result<(StatusCode, Json<FormView>), (StatusCode, Json<Toast>)> {
    match state.sessions.open(request.kind) {
        Ok((id, session)) => Ok((StatusCode::CREATED, Json(form_view(id, &session)))),
        Err(err) => {
            warn!("Could not open {} form: {}", request.kind, err);
            Err((StatusCode::SERVICE_UNAVAILABLE, Json(overloaded_toast())))
        }
    }
}

// Inspect a form instance
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FormView>, StatusCode> {
    let session = find_session(&state, &id)?;
    Ok(Json(form_view(id, &session)))
}

// Record one field edit and return the re-evaluated field set
pub async fn set_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ExtractJson(request): ExtractJson<SetFieldRequest>,
) -> Result<Json<FormView>, StatusCode> {
    let session = find_session(&state, &id)?;
    if !session.kind().fields().contains(&request.name.as_str()) {
        warn!(
            "Rejected unknown field '{}' for {} form {}",
            request.name,
            session.kind(),
            id
        );
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    session.set_field(&request.name, &request.value);
    Ok(Json(form_view(id, &session)))
}

// Submit a form instance to the waitlist API
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SubmitResponse>), StatusCode> {
    let session = find_session(&state, &id)?;
    info!("Received submission for {} form {}", session.kind(), id);

    let result = session.submit(state.transport.as_ref()).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("Form {} submission failed: {}", id, err);
            error_status(err)
        }
    };

    let response = match Feedback::from(result) {
        Feedback::Navigate(route) => SubmitResponse {
            success: true,
            redirect: Some(route.path().to_string()),
            toast: None,
        },
        Feedback::Notify(toast) => SubmitResponse {
            success: false,
            redirect: None,
            toast: Some(toast),
        },
    };

    Ok((status, Json(response)))
}

// Discard a form instance
pub async fn close_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.sessions.close(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// Confirmation page content shown after a successful submission
pub async fn confirmation() -> Json<ConfirmationView> {
    Json(ConfirmationView::default())
}

// Count of open forms, for debugging
pub async fn session_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "open_forms": state.sessions.len() }))
}

// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

// Toast for requests the service had to turn away
pub fn overloaded_toast() -> Toast {
    Toast::error("We're receiving a lot of sign-ups right now. Please try again.")
}
