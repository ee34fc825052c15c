//! Designation management and login handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use super::handlers::engine_error;
use super::json_error;
use super::state::AppState;

/// GET /designations
pub(crate) async fn handle_list_designations(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.designations.list().await {
        Ok(names) => (StatusCode::OK, Json(json!({ "designations": names }))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// POST /designations
pub(crate) async fn handle_add_designation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let name = match body.get("name").and_then(Value::as_str) {
        Some(n) => n,
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'name' field").into_response()
        }
    };
    match state.designations.add(name).await {
        Ok(()) => (StatusCode::CREATED, Json(json!({ "ok": true }))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// POST /designations/remove
pub(crate) async fn handle_remove_designation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let name = match body.get("name").and_then(Value::as_str) {
        Some(n) => n,
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'name' field").into_response()
        }
    };
    match state.designations.remove(name).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// POST /login
///
/// Verifies a username/password pair against the stored salted hashes.
/// Returns `{ "ok": true/false }`; a wrong username and a wrong password
/// are indistinguishable to the caller.
pub(crate) async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let username = match body.get("username").and_then(Value::as_str) {
        Some(u) => u,
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'username' field").into_response()
        }
    };
    let password = match body.get("password").and_then(Value::as_str) {
        Some(p) => p,
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'password' field").into_response()
        }
    };

    match state.users.authenticate(username, password).await {
        Ok(ok) => {
            let status = if ok { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
            (status, Json(json!({ "ok": ok }))).into_response()
        }
        Err(e) => engine_error(e),
    }
}
