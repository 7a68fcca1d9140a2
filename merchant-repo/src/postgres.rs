//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use merchant_types::{Merchant, MerchantRepository, OrderStats, PayGroup, RepoError};

use crate::types::{DbMerchantJson, DbOrderStats, DbPayGroupJson};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository. Config columns are JSONB and arrive pre-decoded.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_tables_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl MerchantRepository for PostgresRepo {
    async fn find_merchant_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, RepoError> {
        let row: Option<DbMerchantJson> = sqlx::query_as(
            r#"SELECT id, user_id, pay_group_id, fee_rate, fee_rates, api_key, notify_url, return_url, status
               FROM merchants WHERE api_key = $1"#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbMerchantJson::into_domain))
    }

    async fn order_stats_for_day(
        &self,
        user_id: i64,
        day: NaiveDate,
    ) -> Result<OrderStats, RepoError> {
        let row: DbOrderStats = sqlx::query_as(
            r#"SELECT
                 COUNT(*) AS order_count,
                 COALESCE(SUM(CASE WHEN status = 1 THEN money ELSE 0 END), 0)::BIGINT AS total_money,
                 COALESCE(SUM(CASE WHEN status = 1 THEN 1 ELSE 0 END), 0)::BIGINT AS success_count
               FROM orders
               WHERE merchant_id = $1 AND (created_at AT TIME ZONE 'UTC')::date = $2"#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.into())
    }

    async fn order_stats_all_time(&self, user_id: i64) -> Result<OrderStats, RepoError> {
        let row: DbOrderStats = sqlx::query_as(
            r#"SELECT
                 COUNT(*) AS order_count,
                 COALESCE(SUM(CASE WHEN status = 1 THEN money ELSE 0 END), 0)::BIGINT AS total_money,
                 COALESCE(SUM(CASE WHEN status = 1 THEN 1 ELSE 0 END), 0)::BIGINT AS success_count
               FROM orders
               WHERE merchant_id = $1"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.into())
    }

    async fn count_provider_links(&self, user_id: i64) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM merchants WHERE user_id = $1 AND status IN ('active', 'approved')"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))
    }

    async fn get_pay_group(&self, id: i64) -> Result<Option<PayGroup>, RepoError> {
        let row: Option<DbPayGroupJson> = sqlx::query_as(
            r#"SELECT id, name, is_default, config FROM provider_pay_groups WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbPayGroupJson::into_domain))
    }

    async fn default_pay_group(&self) -> Result<Option<PayGroup>, RepoError> {
        let row: Option<DbPayGroupJson> = sqlx::query_as(
            r#"SELECT id, name, is_default, config FROM provider_pay_groups
               WHERE is_default ORDER BY id LIMIT 1"#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbPayGroupJson::into_domain))
    }
}
