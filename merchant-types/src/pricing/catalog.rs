//! Registry of supported payment methods.

use crate::domain::{DeviceFilter, DeviceMask, PayType};

/// Immutable set of payment methods, built once and shared.
#[derive(Debug, Clone, PartialEq)]
pub struct PayTypeCatalog {
    entries: Vec<PayType>,
}

impl PayTypeCatalog {
    pub fn new(entries: Vec<PayType>) -> Self {
        Self { entries }
    }

    /// The payment methods this service ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            PayType::new(1, "alipay", "支付宝", "alipay.ico", DeviceMask::Any, 1),
            PayType::new(2, "wxpay", "微信支付", "wxpay.ico", DeviceMask::Any, 2),
            PayType::new(3, "qqpay", "QQ钱包", "qqpay.ico", DeviceMask::Any, 3),
            PayType::new(4, "bank", "银行卡", "bank.ico", DeviceMask::Any, 4),
            PayType::new(5, "usdt", "USDT", "usdt.ico", DeviceMask::Any, 5),
        ])
    }

    /// Active entries applicable to `filter`, ascending by `sort_order`.
    pub fn list(&self, filter: DeviceFilter) -> Vec<&PayType> {
        let mut listed: Vec<&PayType> = self
            .entries
            .iter()
            .filter(|pt| pt.active && pt.device_mask.matches(filter))
            .collect();
        listed.sort_by_key(|pt| pt.sort_order);
        listed
    }

    /// Looks up an active entry by id.
    pub fn find_active(&self, id: i64) -> Option<&PayType> {
        self.entries.iter().find(|pt| pt.active && pt.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PayTypeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
