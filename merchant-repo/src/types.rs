//! Database row types shared by the SQLite and PostgreSQL adapters.

use sqlx::FromRow;

use merchant_types::{Merchant, OrderStats, PayGroup, RawConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Order aggregate row.
#[derive(FromRow)]
pub struct DbOrderStats {
    pub order_count: i64,
    pub total_money: i64,
    pub success_count: i64,
}

impl From<DbOrderStats> for OrderStats {
    fn from(row: DbOrderStats) -> Self {
        OrderStats {
            order_count: row.order_count,
            total_money: row.total_money,
            success_count: row.success_count,
        }
    }
}

/// Pay group row with its config stored as JSON text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbPayGroup {
    pub id: i64,
    pub name: String,
    pub is_default: bool,
    pub config: Option<String>,
}

#[cfg(feature = "sqlite")]
impl DbPayGroup {
    pub fn into_domain(self) -> PayGroup {
        PayGroup {
            id: self.id,
            name: self.name,
            is_default: self.is_default,
            config: RawConfig::from(self.config),
        }
    }
}

/// Pay group row with a native JSON config column.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbPayGroupJson {
    pub id: i64,
    pub name: String,
    pub is_default: bool,
    pub config: Option<serde_json::Value>,
}

#[cfg(feature = "postgres")]
impl DbPayGroupJson {
    pub fn into_domain(self) -> PayGroup {
        PayGroup {
            id: self.id,
            name: self.name,
            is_default: self.is_default,
            config: RawConfig::from(self.config),
        }
    }
}

/// Merchant row with overrides stored as JSON text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbMerchant {
    pub id: i64,
    pub user_id: i64,
    pub pay_group_id: Option<i64>,
    pub fee_rate: Option<f64>,
    pub fee_rates: Option<String>,
    pub api_key: String,
    pub notify_url: Option<String>,
    pub return_url: Option<String>,
    pub status: String,
}

#[cfg(feature = "sqlite")]
impl DbMerchant {
    pub fn into_domain(self) -> Merchant {
        Merchant {
            id: self.id,
            user_id: self.user_id,
            pay_group_id: self.pay_group_id,
            fee_rate: self.fee_rate,
            fee_rates: RawConfig::from(self.fee_rates),
            api_key: self.api_key,
            notify_url: self.notify_url,
            return_url: self.return_url,
            status: self.status,
        }
    }
}

/// Merchant row with a native JSON overrides column.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbMerchantJson {
    pub id: i64,
    pub user_id: i64,
    pub pay_group_id: Option<i64>,
    pub fee_rate: Option<f64>,
    pub fee_rates: Option<serde_json::Value>,
    pub api_key: String,
    pub notify_url: Option<String>,
    pub return_url: Option<String>,
    pub status: String,
}

#[cfg(feature = "postgres")]
impl DbMerchantJson {
    pub fn into_domain(self) -> Merchant {
        Merchant {
            id: self.id,
            user_id: self.user_id,
            pay_group_id: self.pay_group_id,
            fee_rate: self.fee_rate,
            fee_rates: RawConfig::from(self.fee_rates),
            api_key: self.api_key,
            notify_url: self.notify_url,
            return_url: self.return_url,
            status: self.status,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Serializes a config for a TEXT column.
#[cfg(feature = "sqlite")]
pub fn config_to_text(raw: &RawConfig) -> Option<String> {
    match raw {
        RawConfig::Unset => None,
        RawConfig::Text(text) => Some(text.clone()),
        RawConfig::Structured(value) => Some(value.to_string()),
    }
}
