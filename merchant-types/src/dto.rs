//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{MerchantOverview, PayType};

/// Envelope code for a successful response.
pub const CODE_OK: i32 = 0;
/// Envelope code for any failure; details stay in the server logs.
pub const CODE_FAILURE: i32 = -1;

// ─────────────────────────────────────────────────────────────────────────────
// Overview DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Successful overview response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverviewResponse {
    /// Always 0 on success
    #[schema(example = 0)]
    pub code: i32,
    pub data: MerchantOverview,
}

impl OverviewResponse {
    pub fn ok(data: MerchantOverview) -> Self {
        Self {
            code: CODE_OK,
            data,
        }
    }
}

/// Generic failure response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailureResponse {
    /// Non-zero failure code
    pub code: i32,
    #[schema(example = "failed to load overview data")]
    pub msg: String,
}

impl FailureResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_FAILURE,
            msg: msg.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pay type DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for listing payment methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PayTypesQuery {
    /// `desktop` or `mobile`; anything else lists every active method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "mobile")]
    pub device: Option<String>,
}

/// Payment methods available to a device class.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayTypesResponse {
    #[schema(example = 0)]
    pub code: i32,
    pub data: Vec<PayType>,
}

impl PayTypesResponse {
    pub fn ok(data: Vec<PayType>) -> Self {
        Self {
            code: CODE_OK,
            data,
        }
    }
}
