use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, response::Json};
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use medbankr_leads::{
    create_router, handlers::api::overloaded_toast, models::feedback::Toast, AppConfig, AppState,
    MedbankrClient,
};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// Error handler
async fn handle_error(error: BoxError) -> (StatusCode, Json<Toast>) {
    if error.is::<tower::load_shed::error::Overloaded>() {
        (StatusCode::SERVICE_UNAVAILABLE, Json(overloaded_toast()))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Toast::error(format!("Unhandled internal error: {}", error))),
        )
    }
}

// Periodically drop forms whose visitors walked away
async fn sweep_idle_forms(state: Arc<AppState>) {
    let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        if state.sessions.evict_idle() > 0 {
            debug!("{} forms still open after sweep", state.sessions.len());
        }
    }
}

// Resolves on the first Ctrl+C or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => log_interrupt(result),
                    _ = sigterm.recv() => info!("SIGTERM received, draining in-flight requests"),
                }
                return;
            }
            Err(err) => warn!("SIGTERM handler unavailable, listening for Ctrl+C only: {}", err),
        }
    }

    log_interrupt(tokio::signal::ctrl_c().await);
}

fn log_interrupt(result: std::io::Result<()>) {
    match result {
        Ok(()) => info!("Interrupt received, draining in-flight requests"),
        Err(err) => error!("Ctrl+C handler failed, shutting down: {}", err),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medbankr_leads=debug,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    // Initialize the waitlist API client
    let client = MedbankrClient::new(config.api_base_url.clone());
    info!("Forwarding leads to {}", client.base_url());

    if config.is_production {
        info!("Running in PRODUCTION mode - restricting available endpoints");
    } else {
        info!("Running in DEVELOPMENT mode - all endpoints will be available");
    }

    // Create shared application state
    let limits = config.session_limits;
    info!(
        "Open forms capped at {}, idle forms dropped after {}s",
        limits.max_open,
        limits.idle_ttl.num_seconds()
    );
    let app_state = Arc::new(AppState::with_session_limits(Arc::new(client), limits));
    tokio::spawn(sweep_idle_forms(Arc::clone(&app_state)));

    // No request timeout: a pending submission is never cut short
    let app = create_router(app_state, config.is_production).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .load_shed()
            .concurrency_limit(config.max_concurrent_requests)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(Any)),
    );

    info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("Server is ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    info!("Server has been gracefully shut down");
}
