//! Domain models for the merchant overview.

pub mod merchant;
pub mod overview;
pub mod pay_group;
pub mod pay_type;

pub use merchant::{Merchant, MerchantSession, OrderStats};
pub use overview::{MerchantOverview, MerchantPublicInfo, ResolvedRate};
pub use pay_group::PayGroup;
pub use pay_type::{DeviceFilter, DeviceMask, PayType};
