//! Merchant Overview Application Service
//!
//! Orchestrates the overview through the repository port and the pricing
//! core. Contains NO infrastructure logic - pure business orchestration.

use chrono::{NaiveDate, Utc};

use merchant_types::{
    AppError, DeviceFilter, Merchant, MerchantOverview, MerchantRepository, MerchantSession,
    PayGroup, PayType, PayTypeCatalog, RateResolver, RepoError,
};

/// Application service for the merchant dashboard.
///
/// Generic over `R: MerchantRepository` - the adapter is injected at compile time.
/// The payment method catalog is fixed at construction.
pub struct OverviewService<R: MerchantRepository> {
    repo: R,
    resolver: RateResolver,
}

impl<R: MerchantRepository> OverviewService<R> {
    /// Creates a new service with the built-in payment method catalog.
    pub fn new(repo: R) -> Self {
        Self::with_catalog(repo, PayTypeCatalog::builtin())
    }

    /// Creates a new service with a custom catalog.
    pub fn with_catalog(repo: R, catalog: PayTypeCatalog) -> Self {
        Self {
            repo,
            resolver: RateResolver::new(catalog),
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn catalog(&self) -> &PayTypeCatalog {
        self.resolver.catalog()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────────

    /// Resolves an API key to an authenticated merchant session.
    pub async fn authenticate(&self, api_key: &str) -> Result<MerchantSession, AppError> {
        self.repo
            .find_merchant_by_api_key(api_key)
            .await?
            .map(MerchantSession::new)
            .ok_or_else(|| AppError::Unauthorized("Invalid API key".into()))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Overview
    // ─────────────────────────────────────────────────────────────────────────────

    /// Picks the pay group whose rates apply to `merchant`.
    ///
    /// The explicitly assigned group wins if it still exists; otherwise the
    /// default group is used. `None` means no rates can be resolved.
    pub async fn select_pay_group(&self, merchant: &Merchant) -> Result<Option<PayGroup>, RepoError> {
        if let Some(group_id) = merchant.pay_group_id {
            if let Some(group) = self.repo.get_pay_group(group_id).await? {
                return Ok(Some(group));
            }
            tracing::debug!(group_id, "assigned pay group missing, using default");
        }

        self.repo.default_pay_group().await
    }

    /// Builds the dashboard overview with `today` as the daily window.
    ///
    /// The four reads are independent and run concurrently; any failure
    /// aborts the whole overview. Config problems never do.
    pub async fn overview(
        &self,
        session: &MerchantSession,
        today: NaiveDate,
    ) -> Result<MerchantOverview, AppError> {
        let merchant = &session.merchant;

        let (today_stats, total_stats, provider_count, group) = tokio::try_join!(
            self.repo.order_stats_for_day(session.user_id, today),
            self.repo.order_stats_all_time(session.user_id),
            self.repo.count_provider_links(session.user_id),
            self.select_pay_group(merchant),
        )?;

        let rates = self.resolver.resolve(merchant, group.as_ref());

        tracing::debug!(
            merchant_id = merchant.id,
            pay_group = group.as_ref().map(|g| g.id),
            rates = rates.len(),
            "overview assembled"
        );

        Ok(MerchantOverview::assemble(
            today_stats,
            total_stats,
            provider_count,
            merchant,
            group.as_ref(),
            rates,
        ))
    }

    /// Builds the overview for the current UTC day.
    pub async fn overview_today(
        &self,
        session: &MerchantSession,
    ) -> Result<MerchantOverview, AppError> {
        self.overview(session, Utc::now().date_naive()).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists active payment methods for a device class.
    pub fn list_pay_types(&self, filter: DeviceFilter) -> Vec<PayType> {
        self.catalog().list(filter).into_iter().cloned().collect()
    }
}
