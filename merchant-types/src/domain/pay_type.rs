//! Payment method catalog entries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which client devices a payment method can be offered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceMask {
    /// Offered everywhere
    Any,
    DesktopOnly,
    MobileOnly,
}

impl DeviceMask {
    /// Returns true if an entry with this mask should be listed under `filter`.
    pub fn matches(&self, filter: DeviceFilter) -> bool {
        match (self, filter) {
            (_, DeviceFilter::None) | (DeviceMask::Any, _) => true,
            (DeviceMask::DesktopOnly, DeviceFilter::Desktop) => true,
            (DeviceMask::MobileOnly, DeviceFilter::Mobile) => true,
            _ => false,
        }
    }
}

/// Device class requested by a caller when listing payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFilter {
    /// No device filtering.
    #[default]
    None,
    Desktop,
    Mobile,
}

impl DeviceFilter {
    /// Lenient parse: anything that isn't `desktop` or `mobile` means no filter.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => DeviceFilter::Desktop,
            "mobile" => DeviceFilter::Mobile,
            _ => DeviceFilter::None,
        }
    }
}

impl std::fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceFilter::None => write!(f, "none"),
            DeviceFilter::Desktop => write!(f, "desktop"),
            DeviceFilter::Mobile => write!(f, "mobile"),
        }
    }
}

/// A supported settlement channel (card network, wallet, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PayType {
    /// Stable numeric id, referenced by pay group configs
    #[schema(example = 1)]
    pub id: i64,
    /// Short identifier, referenced by merchant per-channel overrides
    #[schema(example = "alipay")]
    pub name: String,
    /// Human readable label
    #[schema(example = "支付宝")]
    pub display_name: String,
    #[schema(example = "alipay.ico")]
    pub icon: String,
    pub device_mask: DeviceMask,
    pub active: bool,
    pub sort_order: i32,
}

impl PayType {
    /// Creates an active catalog entry.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        display_name: impl Into<String>,
        icon: impl Into<String>,
        device_mask: DeviceMask,
        sort_order: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            icon: icon.into(),
            device_mask,
            active: true,
            sort_order,
        }
    }

    /// Returns the same entry marked inactive.
    pub fn disabled(mut self) -> Self {
        self.active = false;
        self
    }
}
