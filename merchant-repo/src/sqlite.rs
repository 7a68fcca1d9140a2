//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use merchant_types::{Merchant, MerchantRepository, OrderStats, PayGroup, RepoError};

use crate::types::{DbMerchant, DbOrderStats, DbPayGroup, config_to_text};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every in-memory connection is its own database; pin to one that never expires.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Seeding helpers (tests and local setup; not part of the port)
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts a pay group, keeping its id.
    pub async fn insert_pay_group(&self, group: &PayGroup) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO provider_pay_groups (id, name, is_default, config) VALUES (?, ?, ?, ?)"#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(group.is_default)
        .bind(config_to_text(&group.config))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    /// Inserts a merchant, keeping its id.
    pub async fn insert_merchant(&self, merchant: &Merchant) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO merchants (id, user_id, pay_group_id, fee_rate, fee_rates, api_key, notify_url, return_url, status)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(merchant.id)
        .bind(merchant.user_id)
        .bind(merchant.pay_group_id)
        .bind(merchant.fee_rate)
        .bind(config_to_text(&merchant.fee_rates))
        .bind(&merchant.api_key)
        .bind(&merchant.notify_url)
        .bind(&merchant.return_url)
        .bind(&merchant.status)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    /// Records an order for `user_id`. `settled` orders count toward money totals.
    pub async fn insert_order(
        &self,
        user_id: i64,
        money: i64,
        settled: bool,
        created_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO orders (merchant_id, money, status, created_at) VALUES (?, ?, ?, ?)"#,
        )
        .bind(user_id)
        .bind(money)
        .bind(if settled { 1_i64 } else { 0 })
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl MerchantRepository for SqliteRepo {
    async fn find_merchant_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, RepoError> {
        let row: Option<DbMerchant> = sqlx::query_as(
            r#"SELECT id, user_id, pay_group_id, fee_rate, fee_rates, api_key, notify_url, return_url, status
               FROM merchants WHERE api_key = ?"#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbMerchant::into_domain))
    }

    async fn order_stats_for_day(
        &self,
        user_id: i64,
        day: NaiveDate,
    ) -> Result<OrderStats, RepoError> {
        // created_at is stored as RFC 3339 UTC, so the first 10 chars are the date.
        let row: DbOrderStats = sqlx::query_as(
            r#"SELECT
                 COUNT(*) AS order_count,
                 COALESCE(SUM(CASE WHEN status = 1 THEN money ELSE 0 END), 0) AS total_money,
                 COALESCE(SUM(CASE WHEN status = 1 THEN 1 ELSE 0 END), 0) AS success_count
               FROM orders
               WHERE merchant_id = ? AND substr(created_at, 1, 10) = ?"#,
        )
        .bind(user_id)
        .bind(day.format("%Y-%m-%d").to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.into())
    }

    async fn order_stats_all_time(&self, user_id: i64) -> Result<OrderStats, RepoError> {
        let row: DbOrderStats = sqlx::query_as(
            r#"SELECT
                 COUNT(*) AS order_count,
                 COALESCE(SUM(CASE WHEN status = 1 THEN money ELSE 0 END), 0) AS total_money,
                 COALESCE(SUM(CASE WHEN status = 1 THEN 1 ELSE 0 END), 0) AS success_count
               FROM orders
               WHERE merchant_id = ?"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.into())
    }

    async fn count_provider_links(&self, user_id: i64) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM merchants WHERE user_id = ? AND status IN ('active', 'approved')"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))
    }

    async fn get_pay_group(&self, id: i64) -> Result<Option<PayGroup>, RepoError> {
        let row: Option<DbPayGroup> = sqlx::query_as(
            r#"SELECT id, name, is_default, config FROM provider_pay_groups WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbPayGroup::into_domain))
    }

    async fn default_pay_group(&self) -> Result<Option<PayGroup>, RepoError> {
        let row: Option<DbPayGroup> = sqlx::query_as(
            r#"SELECT id, name, is_default, config FROM provider_pay_groups
               WHERE is_default = 1 ORDER BY id LIMIT 1"#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbPayGroup::into_domain))
    }
}
