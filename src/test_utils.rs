//! Helpers shared by the client and end-to-end tests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// A request the fake upstream received: endpoint path and JSON body.
pub type RecordedLead = (String, Value);

/// How the fake upstream answers every request
#[derive(Clone, Copy)]
pub enum UpstreamReply {
    Created,
    Status(u16),
    NotJson,
}

#[derive(Clone)]
struct UpstreamState {
    reply: UpstreamReply,
    received: Arc<Mutex<Vec<RecordedLead>>>,
}

async fn record_lead(
    State(state): State<UpstreamState>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state
        .received
        .lock()
        .unwrap()
        .push((format!("/api/v1/waitlist/{}", kind), body));

    match state.reply {
        UpstreamReply::Created => {
            (StatusCode::CREATED, Json(json!({ "status": "ok" }))).into_response()
        }
        UpstreamReply::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            Json(json!({ "error": "upstream failure" })),
        )
            .into_response(),
        UpstreamReply::NotJson => (StatusCode::OK, "thanks").into_response(),
    }
}

/// Start a stand-in for the waitlist API on an ephemeral local port.
///
/// Returns its base URL and the log of requests it has received.
pub async fn spawn_upstream(reply: UpstreamReply) -> (String, Arc<Mutex<Vec<RecordedLead>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/v1/waitlist/:kind", post(record_lead))
        .with_state(UpstreamState {
            reply,
            received: Arc::clone(&received),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

/// Base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
