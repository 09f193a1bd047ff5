//! HTTP API server

use axum::{
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{identify_request, SessionStore};
use crate::config::Config;
use crate::error::Result;
use crate::identity::{Identity, IdentityDirectory};
use crate::routing::RouteGuard;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub guard: RouteGuard,
}

impl AppState {
    /// Load the identity directory and set up an empty session
    pub fn from_config(config: Config) -> Result<Self> {
        let directory = IdentityDirectory::load_or_builtin(config.directory.fixtures.as_deref())?;
        tracing::info!("Loaded {} identities", directory.len());

        let session = SessionStore::new(Arc::new(directory), config.auth.credential_policy);

        Ok(Self {
            config,
            session,
            guard: RouteGuard::default(),
        })
    }

    /// The identity a request carries a valid token for
    pub fn identify(&self, headers: &HeaderMap) -> Result<Arc<Identity>> {
        identify_request(headers, self.session.directory(), &self.config.auth)
    }
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(routes::health))
        .route("/api/session", get(routes::session_info))
        .route("/api/navigate", get(routes::navigate))
        .route("/api/routes", get(routes::list_routes))
        // Auth routes
        .route("/auth/login", post(routes::login))
        .route("/auth/logout", post(routes::logout))
        .route("/auth/me", get(routes::me))
        // Every other path is a page navigation
        .fallback(crate::ui::page)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
