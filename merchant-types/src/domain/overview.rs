//! Overview report assembled for the merchant dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::merchant::{Merchant, OrderStats};
use super::pay_group::PayGroup;

/// The effective commission rate of one payment method for one merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResolvedRate {
    #[schema(example = "alipay")]
    pub pay_type: String,
    #[serde(rename = "pay_type_name")]
    #[schema(example = "支付宝")]
    pub pay_type_display: String,
    /// Fraction, e.g. 0.06 for 6%
    #[schema(example = 0.06)]
    pub rate: f64,
}

/// Merchant fields exposed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MerchantPublicInfo {
    pub api_key: String,
    pub notify_url: Option<String>,
    pub return_url: Option<String>,
    #[schema(example = "active")]
    pub status: String,
}

impl From<&Merchant> for MerchantPublicInfo {
    fn from(merchant: &Merchant) -> Self {
        Self {
            api_key: merchant.api_key.clone(),
            notify_url: merchant.notify_url.clone(),
            return_url: merchant.return_url.clone(),
            status: merchant.status.clone(),
        }
    }
}

/// Everything the dashboard overview shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MerchantOverview {
    pub today: OrderStats,
    pub total: OrderStats,
    #[serde(rename = "providerCount")]
    pub provider_count: i64,
    pub merchant: MerchantPublicInfo,
    pub pay_group_name: Option<String>,
    pub rates: Vec<ResolvedRate>,
}

impl MerchantOverview {
    /// Assembles the report. Pure pass-through: no numbers are derived here.
    pub fn assemble(
        today: OrderStats,
        total: OrderStats,
        provider_count: i64,
        merchant: &Merchant,
        group: Option<&PayGroup>,
        rates: Vec<ResolvedRate>,
    ) -> Self {
        Self {
            today,
            total,
            provider_count,
            merchant: MerchantPublicInfo::from(merchant),
            pay_group_name: group.map(|g| g.name.clone()),
            rates,
        }
    }
}
