//! Authentication middleware for merchant API keys.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use merchant_types::{AppError, MerchantRepository};

use super::handlers::AppState;

/// Paths served without a merchant key.
const PUBLIC_PATHS: &[&str] = &["/health", "/api-docs/openapi.json"];

/// Extracts the API key from the Authorization header.
/// Expected format: "Bearer <api_key>" or just "<api_key>"
fn extract_api_key(auth_header: Option<&str>) -> Option<&str> {
    let header = auth_header?;
    Some(header.strip_prefix("Bearer ").unwrap_or(header).trim())
}

/// Reads the key from `Authorization`, falling back to `X-API-Key`.
fn api_key_from_headers(headers: &HeaderMap) -> Option<&str> {
    let authorization = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    extract_api_key(authorization)
        .filter(|key| !key.is_empty())
        .or_else(|| {
            headers
                .get("X-API-Key")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|key| !key.is_empty())
        })
}

/// Authentication middleware that resolves the caller to a merchant.
///
/// On success the `MerchantSession` is attached to the request extensions
/// for the handlers. Unknown keys get 401; a failing lookup gets 500.
pub async fn auth_middleware<R: MerchantRepository>(
    State(state): State<Arc<AppState<R>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let api_key = match api_key_from_headers(request.headers()) {
        Some(key) => key.to_owned(),
        None => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    match state.service.authenticate(&api_key).await {
        Ok(session) => {
            tracing::debug!(merchant_id = session.merchant.id, "merchant authenticated");
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(AppError::Unauthorized(msg)) => unauthorized_response(&msg),
        Err(e) => {
            tracing::error!("API key lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Internal server error",
                    "code": 500
                })),
            )
                .into_response()
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": message,
            "code": 401
        })),
    )
        .into_response()
}
