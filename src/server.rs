// server.rs - router assembly shared by the binary and the tests

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{config, AppConfig};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::{ApiResponse, ApiResult};

/// Per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Full application router using the global configuration
pub fn app(state: AppState) -> Router {
    app_with_config(state, config())
}

pub fn app_with_config(state: AppState, cfg: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(league_routes())
        // Token required
        .merge(auth_routes())
        .merge(protected_routes())
        // Admin token required
        .merge(admin_routes());

    if cfg.api.enable_debug_routes {
        if !crate::is_development!() {
            tracing::warn!("Debug routes enabled outside development");
        }
        router = router.merge(debug_routes());
    }

    let mut router = router
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::map_response(method_not_allowed));

    if cfg.security.enable_cors {
        router = router.layer(cors_layer(&cfg.security.cors_origins));
    }
    if cfg.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
}

fn league_routes() -> Router<AppState> {
    use handlers::public::league;

    Router::new()
        .route("/api/standings", get(league::standings))
        .route("/api/current-week", get(league::current_week))
        .route("/api/players", get(league::players))
}

fn auth_routes() -> Router<AppState> {
    use handlers::protected::auth;

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/change-password", put(auth::change_password))
        .route("/api/auth/update-profile", put(auth::update_profile))
}

fn protected_routes() -> Router<AppState> {
    use handlers::protected::{league, trades};

    Router::new()
        .route("/api/player-stats", get(league::player_stats))
        .route(
            "/api/trades",
            get(trades::list).post(trades::propose).patch(trades::respond),
        )
        .route("/api/trades/notifications", get(trades::notifications))
}

fn admin_routes() -> Router<AppState> {
    use handlers::elevated::admin;

    Router::new()
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/users", get(admin::users_get).put(admin::users_put))
}

fn debug_routes() -> Router<AppState> {
    Router::new().route("/api/debug/users", get(handlers::debug::users))
}

/// `*` or an empty list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    endpoints: Vec<&'static str>,
}

async fn root() -> ApiResult<ServiceInfo> {
    Ok(ApiResponse::ok(ServiceInfo {
        name: "PFL API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "POST /api/auth/login",
            "POST /api/auth/register",
            "GET /api/auth/me",
            "PUT /api/auth/change-password",
            "PUT /api/auth/update-profile",
            "GET /api/standings",
            "GET /api/current-week",
            "GET /api/players",
            "GET /api/player-stats",
            "GET, POST, PATCH /api/trades",
            "GET /api/trades/notifications",
            "GET /api/admin/stats",
            "GET, PUT /api/admin/users",
        ],
    }))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    database: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health(State(state): State<AppState>) -> ApiResult<Health> {
    DatabaseManager::health_check(&state.pool).await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(ApiResponse::ok(Health {
        status: "ok",
        database: "ok",
        timestamp: Utc::now(),
    }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Known path, unsupported verb. The router's own 405 has an empty body;
/// swap it for a failure envelope and keep the `Allow` header.
async fn method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut enveloped = ApiError::method_not_allowed("Method not allowed").into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(header::ALLOW, allow);
    }
    enveloped
}
