//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use merchant_types::{
    AppError, DeviceFilter, FailureResponse, MerchantRepository, MerchantSession,
    OverviewResponse, PayTypesQuery, PayTypesResponse,
};

use crate::OverviewService;

/// Message returned to clients whenever the overview cannot be produced.
pub const OVERVIEW_FAILURE_MSG: &str = "failed to load overview data";

/// Application state shared across handlers.
pub struct AppState<R: MerchantRepository> {
    pub service: OverviewService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(detail) => {
                // Storage details stay in the logs.
                tracing::error!(error = %detail, "overview request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    OVERVIEW_FAILURE_MSG.to_string(),
                )
            }
        };

        (status, Json(FailureResponse::new(message))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Dashboard overview for the authenticated merchant.
#[tracing::instrument(skip(state, session), fields(merchant_id = session.merchant.id))]
pub async fn overview<R: MerchantRepository>(
    State(state): State<Arc<AppState<R>>>,
    Extension(session): Extension<MerchantSession>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.service.overview_today(&session).await?;
    Ok(Json(OverviewResponse::ok(data)))
}

/// Active payment methods, optionally narrowed to a device class.
#[tracing::instrument(skip(state))]
pub async fn pay_types<R: MerchantRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<PayTypesQuery>,
) -> impl IntoResponse {
    let filter = query
        .device
        .as_deref()
        .map(DeviceFilter::parse)
        .unwrap_or_default();

    Json(PayTypesResponse::ok(state.service.list_pay_types(filter)))
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}
