//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use chrono::NaiveDate;

use crate::domain::{Merchant, OrderStats, PayGroup};
use crate::error::RepoError;

/// Read-only data access needed by the merchant overview.
///
/// Every method is an independent read; callers may issue them concurrently.
#[async_trait::async_trait]
pub trait MerchantRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────────

    /// Finds the merchant owning an API key.
    async fn find_merchant_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Order aggregates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Order counters for orders created on `day` (UTC).
    async fn order_stats_for_day(&self, user_id: i64, day: NaiveDate)
    -> Result<OrderStats, RepoError>;

    /// Order counters across all time.
    async fn order_stats_all_time(&self, user_id: i64) -> Result<OrderStats, RepoError>;

    /// Number of active or approved provider relationships of the user.
    async fn count_provider_links(&self, user_id: i64) -> Result<i64, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Pay groups
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a pay group by ID.
    async fn get_pay_group(&self, id: i64) -> Result<Option<PayGroup>, RepoError>;

    /// Gets the group flagged as default, if any.
    async fn default_pay_group(&self) -> Result<Option<PayGroup>, RepoError>;
}
