use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{
    close_form, confirmation, get_form, health_check, open_form, session_stats, set_field,
    submit_form, AppState,
};

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/success", get(confirmation))
        .route("/forms", post(open_form))
        .route("/forms/:id/fields", put(set_field))
        .route("/forms/:id/submit", post(submit_form));

    // Only expose form inspection outside production
    if !is_production {
        router = router
            .route("/forms/:id", get(get_form).delete(close_form))
            .route("/debug/forms", get(session_stats));

        info!("Form inspection routes enabled - server running in development mode");
    } else {
        router = router.route("/forms/:id", delete(close_form));
        info!("Running in production mode - form inspection routes hidden");
    }

    router.with_state(app_state)
}
