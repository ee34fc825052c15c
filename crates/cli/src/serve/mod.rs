//! `docket serve` -- HTTP JSON API server for the record lifecycle engine.
//!
//! Exposes the receiving office's record tracking as an async HTTP service
//! using `axum` + `tokio`. Supports concurrent request handling.
//!
//! Security features:
//! - CORS headers on all responses (permissive for local dev)
//! - Per-IP rate limiting (default: 60 req/min, configurable)
//! - Optional API key authentication via DOCKET_API_KEY env var
//! - Login verification against salted password hashes, never plaintext
//!
//! Endpoints:
//! - GET  /health                          - Server status (exempt from auth)
//! - GET  /types                           - Record-type registry
//! - GET  /records/{type}                  - List records of a type
//! - POST /records/{type}                  - Create a record
//! - POST /records/{type}/{id}/edit        - Edit fields, append history
//! - POST /records/{type}/{id}/reject      - Reject with remarks
//! - POST /records/{type}/{id}/time-out    - Complete and stamp time-out
//! - GET  /records/{type}/log              - Receiving-log rows
//! - GET  /designations                    - Designation names
//! - POST /designations                    - Add a designation
//! - POST /designations/remove             - Remove a designation
//! - POST /login                           - Verify credentials
//!
//! All responses use Content-Type: application/json.

mod admin;
mod handlers;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Json, Router};
use tower_http::cors::{Any, CorsLayer};

use docket_engine::{Designations, LifecycleEngine, Users};
use docket_storage::{DocumentStore, MemoryStore};

use self::admin::{
    handle_add_designation, handle_list_designations, handle_login, handle_remove_designation,
};
use self::handlers::{
    handle_create, handle_edit, handle_health, handle_list, handle_not_found, handle_receiving_log,
    handle_reject, handle_time_out, handle_types,
};
use self::middleware::{auth_middleware, rate_limit_middleware};
use self::state::{AppState, RateLimiter};

/// Maximum request body size: 1 MB. Record forms are small.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Default rate limit: 60 requests per minute per IP.
const DEFAULT_RATE_LIMIT: u64 = 60;

/// Rate limit window duration in seconds (1 minute).
const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Start the HTTP server on the given port.
///
/// When TLS cert/key paths are provided, the server listens over HTTPS
/// using `axum-server` with rustls. Otherwise it uses plain HTTP.
///
/// Security:
/// - CORS: Permissive (`Any` origin) for local dev; tighten for production.
/// - Rate limit: Per-IP, configurable via DOCKET_RATE_LIMIT (default 60 req/min).
/// - API key: If DOCKET_API_KEY is set, all endpoints except /health require auth.
pub async fn start_server(
    port: u16,
    seed: Option<PathBuf>,
    _tls_cert: Option<PathBuf>,
    _tls_key: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryStore::new());

    if let Some(path) = &seed {
        seed_from_file(&store, path).await?;
    }

    // Rate limit: from DOCKET_RATE_LIMIT env var, or default
    let rate_limit = std::env::var("DOCKET_RATE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT);

    // API key: from DOCKET_API_KEY env var (None = no auth)
    let api_key = std::env::var("DOCKET_API_KEY")
        .ok()
        .filter(|k| !k.is_empty());

    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    }
    tracing::info!(rate_limit, "rate limit (requests per minute per IP)");

    let state = Arc::new(AppState {
        engine: LifecycleEngine::new(store.clone()),
        designations: Designations::new(store.clone()),
        users: Users::new(store),
        rate_limiter: RateLimiter::new(rate_limit),
        api_key,
    });

    // CORS: permissive for local dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/types", get(handle_types))
        .route("/records/{type}", get(handle_list).post(handle_create))
        .route("/records/{type}/log", get(handle_receiving_log))
        .route("/records/{type}/{id}/edit", post(handle_edit))
        .route("/records/{type}/{id}/reject", post(handle_reject))
        .route("/records/{type}/{id}/time-out", post(handle_time_out))
        .route(
            "/designations",
            get(handle_list_designations).post(handle_add_designation),
        )
        .route("/designations/remove", post(handle_remove_designation))
        .route("/login", post(handle_login))
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);

    // TLS support via axum-server + rustls (requires `tls` feature)
    #[cfg(feature = "tls")]
    if let (Some(cert_path), Some(key_path)) = (&_tls_cert, &_tls_key) {
        let config =
            axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path).await?;
        let socket_addr: std::net::SocketAddr = addr.parse()?;
        tracing::info!(port, "docket listening on https");
        axum_server::bind_rustls(socket_addr, config)
            .serve(app.into_make_service_with_connect_info::<std::net::SocketAddr>())
            .await?;
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(port, "docket listening on http");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Pre-load designations and users from a JSON seed file.
///
/// Format:
/// ```json
/// {
///   "designations": ["Admin", "Budget Office"],
///   "users": [
///     {"username": "clerk1", "password": "s3cret"},
///     {"username": "clerk2", "password_hash": "sha256$..$.."}
///   ]
/// }
/// ```
///
/// Plaintext `password` entries are hashed before storage; `password_hash`
/// entries are stored as-is.
async fn seed_from_file(
    store: &Arc<MemoryStore>,
    path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let seed: serde_json::Value = serde_json::from_str(&raw)?;

    let designations = Designations::new(store.clone());
    for name in seed
        .get("designations")
        .and_then(|v| v.as_array())
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str())
    {
        designations.add(name).await?;
    }

    for user in seed
        .get("users")
        .and_then(|v| v.as_array())
        .into_iter()
        .flatten()
    {
        let username = match user.get("username").and_then(|v| v.as_str()) {
            Some(u) => u,
            None => continue,
        };
        if let Some(hash) = user.get("password_hash").and_then(|v| v.as_str()) {
            let mut fields = serde_json::Map::new();
            fields.insert("username".to_string(), serde_json::json!(username));
            fields.insert("password_hash".to_string(), serde_json::json!(hash));
            store.add_document("users", fields).await?;
        } else if let Some(password) = user.get("password").and_then(|v| v.as_str()) {
            Users::new(store.clone()).add(username, password).await?;
        }
    }

    tracing::info!(path = %path.display(), "seed file loaded");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("received shutdown signal");
}
