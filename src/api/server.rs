// API Server Implementation

use crate::api::{routes, state::AppState};
use crate::config::ServerSettings;
use crate::monitor::DeadlineMonitor;
use crate::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Build the router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(
            "/api",
            get(routes::hosts::list_hosts).post(routes::hosts::register_host),
        )
        .route(
            "/api/",
            get(routes::hosts::list_hosts).post(routes::hosts::register_host),
        )
        .route("/api/:hostname", get(routes::hosts::show_host))
        .route("/api/check/:hostname", post(routes::check::check_deadline))
        .route("/health", get(routes::health::health_check))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// API Server
pub struct ApiServer {
    settings: ServerSettings,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(settings: ServerSettings, monitor: Arc<DeadlineMonitor>) -> Self {
        Self {
            settings,
            state: Arc::new(AppState::new(monitor)),
        }
    }

    /// Listen address as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.settings.host, self.settings.port)
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let app = router(self.state.clone());

        let addr = self.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("SSL deadline API listening on {}", addr);
        info!("Registry backend: {}", self.state.registry().backend_name());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
