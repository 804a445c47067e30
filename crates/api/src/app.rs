use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Config;
use crate::middleware::trace_id;
use crate::routes::{admin_analytics, admin_logs, admin_users, events, health, sessions};
use crate::services::{AuthClient, FunctionsClient};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Present only when a collaborator base URL is configured.
    pub functions_client: Option<Arc<FunctionsClient>>,
    pub auth_client: Option<Arc<AuthClient>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let (functions_client, auth_client) = if config.collaborators_enabled() {
        let functions = FunctionsClient::new(&config.collaborators)
            .map(Arc::new)
            .map_err(|e| warn!("Functions client unavailable: {}", e))
            .ok();
        let auth = AuthClient::new(&config.collaborators)
            .map(Arc::new)
            .map_err(|e| warn!("Auth client unavailable: {}", e))
            .ok();
        (functions, auth)
    } else {
        (None, None)
    };

    let state = AppState {
        pool,
        config: config.clone(),
        functions_client,
        auth_client,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Telemetry recording routes (advisory, never 5xx on store errors)
    let telemetry_routes = Router::new()
        .route("/api/v1/sessions", post(sessions::open_session))
        .route(
            "/api/v1/sessions/:session_id/close",
            post(sessions::close_session),
        )
        .route("/api/v1/events", post(events::record_event))
        .route("/api/v1/searches", post(events::record_search))
        .route("/api/v1/logs", post(events::record_log));

    // Admin console routes (failures surface as JSON errors)
    let admin_routes = Router::new()
        .route("/api/admin/v1/analytics", get(admin_analytics::get_analytics))
        .route(
            "/api/admin/v1/users",
            get(admin_users::list_users).post(admin_users::create_user),
        )
        .route("/api/admin/v1/users/:user_id", get(admin_users::get_user))
        .route(
            "/api/admin/v1/users/:user_id/ban",
            post(admin_users::ban_user),
        )
        .route(
            "/api/admin/v1/users/:user_id/unban",
            post(admin_users::unban_user),
        )
        .route(
            "/api/admin/v1/users/:user_id/role",
            put(admin_users::change_user_role),
        )
        .route(
            "/api/admin/v1/users/reset-password",
            post(admin_users::reset_password),
        )
        .route(
            "/api/admin/v1/logs",
            get(admin_logs::list_logs).delete(admin_logs::purge_logs),
        )
        .route("/api/admin/v1/logs/export", get(admin_logs::export_logs));

    // Public health routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live));

    Router::new()
        .merge(public_routes)
        .merge(telemetry_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
