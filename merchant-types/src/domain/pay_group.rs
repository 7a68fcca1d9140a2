//! Pay group domain model.

use crate::pricing::RawConfig;

/// A named bundle of per-payment-type default rates.
#[derive(Debug, Clone, PartialEq)]
pub struct PayGroup {
    pub id: i64,
    pub name: String,
    /// Fallback group for merchants with no explicit assignment
    pub is_default: bool,
    /// Pay type id (as a string key) -> `{ "rate": percentage, ... }`
    pub config: RawConfig,
}

impl PayGroup {
    pub fn new(id: i64, name: impl Into<String>, config: RawConfig) -> Self {
        Self {
            id,
            name: name.into(),
            is_default: false,
            config,
        }
    }

    /// Marks this group as the default one.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}
