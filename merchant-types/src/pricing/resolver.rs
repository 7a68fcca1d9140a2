//! Effective fee-rate resolution.
//!
//! Each payment method priced by the merchant's pay group gets exactly one
//! rate, picked from three layered sources (highest priority first):
//!
//! 1. the merchant's per-channel override (`fee_rates[pay_type.name]`)
//! 2. the merchant-wide override (`fee_rate`)
//! 3. the pay group's own `rate` for that payment method
//!
//! All stored values are percentages; resolved rates are fractions.

use serde_json::Value;

use super::catalog::PayTypeCatalog;
use super::fee_config::{self, ConfigMap};
use crate::domain::{Merchant, PayGroup, PayType, ResolvedRate};

/// Which layer a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    ChannelOverride,
    MerchantOverride,
    GroupDefault,
}

/// Resolves merchant fee rates against a fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct RateResolver {
    catalog: PayTypeCatalog,
}

impl RateResolver {
    pub fn new(catalog: PayTypeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PayTypeCatalog {
        &self.catalog
    }

    /// Resolves one rate per payment method priced in `group`.
    ///
    /// The output follows the group config's own key order. Entries that
    /// reference unknown or inactive payment methods, or carry no usable
    /// `rate`, produce nothing. With no group, or an undecodable group
    /// config, the result is empty.
    pub fn resolve(&self, merchant: &Merchant, group: Option<&PayGroup>) -> Vec<ResolvedRate> {
        let overrides = fee_config::decode(&merchant.fee_rates);

        let Some(group) = group else {
            return Vec::new();
        };
        let Some(config) = fee_config::decode(&group.config) else {
            return Vec::new();
        };

        let mut rates = Vec::with_capacity(config.len());
        for (key, entry) in &config {
            let Some(pay_type) = self.lookup(key) else {
                tracing::debug!(group_id = group.id, key = %key, "no active pay type for group entry");
                continue;
            };

            // No price in this group means the method isn't offered: skip, don't zero-rate.
            let Some(group_rate) = entry.get("rate").and_then(fee_config::as_percentage) else {
                continue;
            };

            let (percentage, source) =
                select_rate(pay_type, overrides.as_ref(), merchant.fee_rate, group_rate);
            tracing::trace!(pay_type = %pay_type.name, ?source, percentage, "resolved fee rate");

            rates.push(ResolvedRate {
                pay_type: pay_type.name.clone(),
                pay_type_display: pay_type.display_name.clone(),
                rate: percentage / 100.0,
            });
        }

        rates
    }

    fn lookup(&self, key: &str) -> Option<&PayType> {
        let id = key.trim().parse::<i64>().ok()?;
        self.catalog.find_active(id)
    }
}

/// Picks the raw percentage for one payment method by priority.
fn select_rate(
    pay_type: &PayType,
    overrides: Option<&ConfigMap>,
    merchant_rate: Option<f64>,
    group_rate: f64,
) -> (f64, RateSource) {
    // A key stored as `null` is a present override of 0; a missing key is not.
    let channel = overrides
        .and_then(|o| o.get(&pay_type.name))
        .and_then(|value| match value {
            Value::Null => Some(0.0),
            other => fee_config::as_percentage(other),
        });
    if let Some(rate) = channel {
        return (rate, RateSource::ChannelOverride);
    }

    // Zero is a real override, not "unset".
    if let Some(rate) = merchant_rate {
        return (rate, RateSource::MerchantOverride);
    }

    (group_rate, RateSource::GroupDefault)
}
