//! Merchant domain model.

use serde::{Deserialize, Serialize};

use crate::pricing::RawConfig;

/// A merchant account as seen by the overview: read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Merchant {
    pub id: i64,
    /// Owning user; orders and provider links are keyed by this.
    pub user_id: i64,
    /// Explicitly assigned pay group, if any
    pub pay_group_id: Option<i64>,
    /// Merchant-wide override, as a percentage (6 means 6%)
    pub fee_rate: Option<f64>,
    /// Per-channel overrides: pay type name -> percentage
    pub fee_rates: RawConfig,
    pub api_key: String,
    pub notify_url: Option<String>,
    pub return_url: Option<String>,
    pub status: String,
}

impl Merchant {
    /// Creates a merchant with no group assignment and no overrides.
    pub fn new(id: i64, user_id: i64, api_key: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            pay_group_id: None,
            fee_rate: None,
            fee_rates: RawConfig::Unset,
            api_key: api_key.into(),
            notify_url: None,
            return_url: None,
            status: "active".to_string(),
        }
    }
}

/// Authenticated request context produced by the identity layer.
#[derive(Debug, Clone)]
pub struct MerchantSession {
    pub user_id: i64,
    pub merchant: Merchant,
}

impl MerchantSession {
    pub fn new(merchant: Merchant) -> Self {
        Self {
            user_id: merchant.user_id,
            merchant,
        }
    }
}

/// Aggregate order counters for one time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderStats {
    /// All orders in the window, settled or not
    #[schema(example = 12)]
    pub order_count: i64,
    /// Sum of settled order amounts, in minor units
    #[schema(example = 158000)]
    pub total_money: i64,
    /// Number of settled orders
    #[schema(example = 9)]
    pub success_count: i64,
}
