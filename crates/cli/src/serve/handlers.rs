//! Core HTTP route handlers: health, types, and the record lifecycle.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

use docket_core::Record;
use docket_engine::{receiving_log_rows, EngineError};

use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = json!({
        "status": "ok",
        "docket_version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// GET /types
pub(crate) async fn handle_types() -> impl IntoResponse {
    let types: Vec<Value> = docket_core::registry()
        .iter()
        .map(|t| {
            json!({
                "key": t.key,
                "name": t.name,
                "prefix": t.prefix,
                "required_fields": t.fields.iter().map(|f| f.name).collect::<Vec<_>>(),
                "remarks_required_on_reject": t.remarks_required_on_reject,
                "remarks_required_on_time_out": t.remarks_required_on_time_out,
                "refresh": t.refresh,
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "types": types })))
}

/// Map an engine failure to the HTTP error taxonomy.
///
/// Validation and stale-state failures carry their specific message; store
/// failures surface as a generic message with the detail kept server-side.
pub(crate) fn engine_error(e: EngineError) -> Response {
    let (status, message) = match &e {
        EngineError::UnknownType { .. } | EngineError::NotFound { .. } => {
            (StatusCode::NOT_FOUND, e.to_string())
        }
        EngineError::Validation(_) | EngineError::AlreadyTimedOut { .. } => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        EngineError::DuplicateDesignation { .. } => (StatusCode::CONFLICT, e.to_string()),
        EngineError::Store(_) | EngineError::Serialize(_) => {
            tracing::error!(error = %e, "store operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "error performing operation".to_string(),
            )
        }
    };
    json_error(status, &message).into_response()
}

/// A record as an API response object: stored fields plus the store id.
fn record_json(record: &Record) -> Value {
    let mut map = record.to_fields().unwrap_or_default();
    map.insert("id".to_string(), json!(record.id));
    Value::Object(map)
}

fn body_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

fn body_fields(body: &Value) -> Option<Map<String, Value>> {
    body.get("fields").and_then(Value::as_object).cloned()
}

/// GET /records/{type}
pub(crate) async fn handle_list(
    State(state): State<Arc<AppState>>,
    Path(type_key): Path<String>,
) -> impl IntoResponse {
    match state.engine.list(&type_key).await {
        Ok(records) => {
            let records: Vec<Value> = records.iter().map(record_json).collect();
            (StatusCode::OK, Json(json!({ "records": records }))).into_response()
        }
        Err(e) => engine_error(e),
    }
}

/// POST /records/{type}
pub(crate) async fn handle_create(
    State(state): State<Arc<AppState>>,
    Path(type_key): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let actor = match body_str(&body, "actor") {
        Some(a) => a.to_string(),
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'actor' field").into_response()
        }
    };
    let fields = match body_fields(&body) {
        Some(f) => f,
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'fields' object").into_response()
        }
    };

    match state.engine.create(&type_key, fields, &actor).await {
        Ok(record) => (StatusCode::CREATED, Json(record_json(&record))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// POST /records/{type}/{id}/edit
pub(crate) async fn handle_edit(
    State(state): State<Arc<AppState>>,
    Path((type_key, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let actor = match body_str(&body, "actor") {
        Some(a) => a.to_string(),
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'actor' field").into_response()
        }
    };
    let fields = match body_fields(&body) {
        Some(f) => f,
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'fields' object").into_response()
        }
    };

    match state.engine.edit(&type_key, &id, fields, &actor).await {
        Ok(record) => (StatusCode::OK, Json(record_json(&record))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// POST /records/{type}/{id}/reject
pub(crate) async fn handle_reject(
    State(state): State<Arc<AppState>>,
    Path((type_key, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let actor = match body_str(&body, "actor") {
        Some(a) => a.to_string(),
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'actor' field").into_response()
        }
    };
    let remarks = body_str(&body, "remarks").unwrap_or_default().to_string();

    match state.engine.reject(&type_key, &id, &remarks, &actor).await {
        Ok(record) => (StatusCode::OK, Json(record_json(&record))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// POST /records/{type}/{id}/time-out
pub(crate) async fn handle_time_out(
    State(state): State<Arc<AppState>>,
    Path((type_key, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let actor = match body_str(&body, "actor") {
        Some(a) => a.to_string(),
        None => {
            return json_error(StatusCode::BAD_REQUEST, "missing 'actor' field").into_response()
        }
    };
    let date_time_out = body_str(&body, "date_time_out").unwrap_or_default().to_string();
    let remarks = body_str(&body, "remarks").unwrap_or_default().to_string();

    match state
        .engine
        .time_out(&type_key, &id, &date_time_out, &remarks, &actor)
        .await
    {
        Ok(record) => (StatusCode::OK, Json(record_json(&record))).into_response(),
        Err(e) => engine_error(e),
    }
}

/// GET /records/{type}/log
pub(crate) async fn handle_receiving_log(
    State(state): State<Arc<AppState>>,
    Path(type_key): Path<String>,
) -> impl IntoResponse {
    let spec = match docket_core::find_type(&type_key) {
        Some(s) => s,
        None => {
            return json_error(
                StatusCode::NOT_FOUND,
                &format!("unknown record type: {type_key}"),
            )
            .into_response()
        }
    };

    match state.engine.list(&type_key).await {
        Ok(records) => {
            let rows = receiving_log_rows(spec, &records);
            (StatusCode::OK, Json(json!({ "rows": rows }))).into_response()
        }
        Err(e) => engine_error(e),
    }
}
