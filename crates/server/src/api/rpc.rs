//! RPC endpoint: decodes query and body, then hands off to the core router.

use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde_json::Value;
use std::sync::Arc;
use ticketdesk_core::{Payload, RpcError, RpcRequest, RpcResponse};
use tracing::debug;

use crate::metrics;
use crate::state::AppState;

/// Largest body accepted by the endpoint.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Handle any request that is not an operational endpoint.
pub async fn dispatch(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let query = query_payload(request.uri());
    let method = query
        .get("method")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let body = match decode_body(request).await {
        Ok(body) => body,
        Err(error) => return render(RpcResponse::from(error)),
    };

    let rpc_request = RpcRequest {
        method,
        query,
        body,
    };
    let response = state.router().dispatch(&rpc_request);
    debug!(
        method = rpc_request.method.as_deref().unwrap_or(""),
        status = response.status,
        "rpc request handled"
    );

    metrics::record_rpc(
        rpc_request.operation(),
        &response,
        state.ticket_store().len(),
    );
    render(response)
}

fn render(response: RpcResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

/// Query-string parameters as text values. The first occurrence of a
/// repeated key wins; an unparseable query string yields no parameters.
pub fn query_payload(uri: &Uri) -> Payload {
    let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();

    let mut payload = Payload::new();
    for (key, value) in pairs {
        payload.entry(key).or_insert(Value::String(value));
    }
    payload
}

/// Decode the request body according to its content type.
///
/// Only `POST`, `PUT` and `PATCH` requests carry a body; any other method
/// yields `Ok(None)`, which also keeps the urlencoded branch from falling
/// back to the query string. Returns `Ok(None)` for an empty body. Content
/// types other than JSON, urlencoded forms and multipart forms produce a
/// payload without fields.
pub async fn decode_body(request: Request) -> Result<Option<Payload>, RpcError> {
    if !carries_body(request.method()) {
        return Ok(None);
    }

    let content_type = content_type(request.headers());

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|_| RpcError::InvalidBody)?;
        return multipart_payload(multipart).await.map(Some);
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|_| RpcError::InvalidBody)?;
        if pairs.is_empty() {
            return Ok(None);
        }
        let mut payload = Payload::new();
        for (key, value) in pairs {
            payload.insert(key, Value::String(value));
        }
        return Ok(Some(payload));
    }

    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| RpcError::InvalidBody)?;
    if bytes.is_empty() {
        return Ok(None);
    }

    if is_json(&content_type) {
        let value: Value = serde_json::from_slice(&bytes).map_err(|_| RpcError::InvalidBody)?;
        return Ok(Some(match value {
            Value::Object(fields) => fields,
            _ => Payload::new(),
        }));
    }

    Ok(Some(Payload::new()))
}

async fn multipart_payload(mut multipart: Multipart) -> Result<Payload, RpcError> {
    let mut payload = Payload::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| RpcError::InvalidBody)?
    {
        // Uploaded files are not ticket fields.
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await.map_err(|_| RpcError::InvalidBody)?;
        payload.insert(name, Value::String(value));
    }
    Ok(payload)
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence == "application/json" || essence.ends_with("+json")
}
