//! OverviewService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;

    use merchant_types::{
        AppError, DeviceFilter, Merchant, MerchantRepository, MerchantSession, OrderStats,
        PayGroup, RawConfig, RepoError,
    };

    use crate::OverviewService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        merchants: Mutex<Vec<Merchant>>,
        groups: Mutex<HashMap<i64, PayGroup>>,
        /// (user_id, day) -> stats; `None` day means all-time.
        stats: Mutex<HashMap<(i64, Option<NaiveDate>), OrderStats>>,
        provider_links: Mutex<HashMap<i64, i64>>,
        fail_stats: AtomicBool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                merchants: Mutex::new(Vec::new()),
                groups: Mutex::new(HashMap::new()),
                stats: Mutex::new(HashMap::new()),
                provider_links: Mutex::new(HashMap::new()),
                fail_stats: AtomicBool::new(false),
            }
        }

        pub fn with_merchant(self, merchant: Merchant) -> Self {
            self.merchants.lock().unwrap().push(merchant);
            self
        }

        pub fn with_group(self, group: PayGroup) -> Self {
            self.groups.lock().unwrap().insert(group.id, group);
            self
        }

        pub fn with_stats(self, user_id: i64, day: Option<NaiveDate>, stats: OrderStats) -> Self {
            self.stats.lock().unwrap().insert((user_id, day), stats);
            self
        }

        pub fn with_provider_links(self, user_id: i64, count: i64) -> Self {
            self.provider_links.lock().unwrap().insert(user_id, count);
            self
        }

        pub fn failing_stats(self) -> Self {
            self.fail_stats.store(true, Ordering::SeqCst);
            self
        }

        fn stats_for(&self, user_id: i64, day: Option<NaiveDate>) -> Result<OrderStats, RepoError> {
            if self.fail_stats.load(Ordering::SeqCst) {
                return Err(RepoError::Database("connection refused".into()));
            }
            Ok(self
                .stats
                .lock()
                .unwrap()
                .get(&(user_id, day))
                .copied()
                .unwrap_or_default())
        }
    }

    #[async_trait]
    impl MerchantRepository for MockRepo {
        async fn find_merchant_by_api_key(
            &self,
            api_key: &str,
        ) -> Result<Option<Merchant>, RepoError> {
            Ok(self
                .merchants
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.api_key == api_key)
                .cloned())
        }

        async fn order_stats_for_day(
            &self,
            user_id: i64,
            day: NaiveDate,
        ) -> Result<OrderStats, RepoError> {
            self.stats_for(user_id, Some(day))
        }

        async fn order_stats_all_time(&self, user_id: i64) -> Result<OrderStats, RepoError> {
            self.stats_for(user_id, None)
        }

        async fn count_provider_links(&self, user_id: i64) -> Result<i64, RepoError> {
            Ok(self
                .provider_links
                .lock()
                .unwrap()
                .get(&user_id)
                .copied()
                .unwrap_or(0))
        }

        async fn get_pay_group(&self, id: i64) -> Result<Option<PayGroup>, RepoError> {
            Ok(self.groups.lock().unwrap().get(&id).cloned())
        }

        async fn default_pay_group(&self) -> Result<Option<PayGroup>, RepoError> {
            let groups = self.groups.lock().unwrap();
            let mut defaults: Vec<_> = groups.values().filter(|g| g.is_default).collect();
            defaults.sort_by_key(|g| g.id);
            Ok(defaults.first().map(|g| (*g).clone()))
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn standard_group() -> PayGroup {
        PayGroup::new(
            1,
            "standard",
            RawConfig::Text(r#"{"1": {"rate": 6}, "2": {"rate": 5}}"#.into()),
        )
        .as_default()
    }

    fn vip_group() -> PayGroup {
        PayGroup::new(
            2,
            "vip",
            RawConfig::Structured(json!({"1": {"rate": 4}, "3": {"rate": null}})),
        )
    }

    fn session(merchant: Merchant) -> MerchantSession {
        MerchantSession::new(merchant)
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let merchant = Merchant::new(1, 100, "mk_live");
        let service = OverviewService::new(MockRepo::new().with_merchant(merchant));

        let session = service.authenticate("mk_live").await.unwrap();

        assert_eq!(session.user_id, 100);
        assert_eq!(session.merchant.id, 1);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_key() {
        let service = OverviewService::new(MockRepo::new());

        let result = service.authenticate("nope").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_overview_uses_assigned_group() {
        let mut merchant = Merchant::new(1, 100, "mk");
        merchant.pay_group_id = Some(2);
        let service = OverviewService::new(
            MockRepo::new()
                .with_group(standard_group())
                .with_group(vip_group()),
        );

        let overview = service.overview(&session(merchant), day()).await.unwrap();

        assert_eq!(overview.pay_group_name.as_deref(), Some("vip"));
        assert_eq!(overview.rates.len(), 1);
        assert_eq!(overview.rates[0].pay_type, "alipay");
        assert_eq!(overview.rates[0].rate, 0.04);
    }

    #[tokio::test]
    async fn test_overview_falls_back_to_default_group() {
        let mut merchant = Merchant::new(1, 100, "mk");
        merchant.pay_group_id = Some(42);
        let service = OverviewService::new(MockRepo::new().with_group(standard_group()));

        let overview = service.overview(&session(merchant), day()).await.unwrap();

        assert_eq!(overview.pay_group_name.as_deref(), Some("standard"));
        let names: Vec<_> = overview.rates.iter().map(|r| r.pay_type.as_str()).collect();
        assert_eq!(names, vec!["alipay", "wxpay"]);
    }

    #[tokio::test]
    async fn test_overview_without_any_group_still_reports_stats() {
        let mut merchant = Merchant::new(1, 100, "mk_live");
        merchant.pay_group_id = Some(42);
        merchant.fee_rate = Some(3.0);
        merchant.return_url = Some("https://shop.example/return".into());

        let today = OrderStats {
            order_count: 4,
            total_money: 2500,
            success_count: 3,
        };
        let total = OrderStats {
            order_count: 40,
            total_money: 90000,
            success_count: 31,
        };
        let service = OverviewService::new(
            MockRepo::new()
                .with_stats(100, Some(day()), today)
                .with_stats(100, None, total)
                .with_provider_links(100, 1),
        );

        let overview = service.overview(&session(merchant), day()).await.unwrap();

        assert!(overview.rates.is_empty());
        assert!(overview.pay_group_name.is_none());
        assert_eq!(overview.today, today);
        assert_eq!(overview.total, total);
        assert_eq!(overview.provider_count, 1);
        assert_eq!(overview.merchant.api_key, "mk_live");
        assert_eq!(
            overview.merchant.return_url.as_deref(),
            Some("https://shop.example/return")
        );
    }

    #[tokio::test]
    async fn test_overview_applies_merchant_overrides() {
        let mut merchant = Merchant::new(1, 100, "mk");
        merchant.fee_rate = Some(3.0);
        merchant.fee_rates = RawConfig::Text(r#"{"wxpay": 2}"#.into());
        let service = OverviewService::new(MockRepo::new().with_group(standard_group()));

        let overview = service.overview(&session(merchant), day()).await.unwrap();

        let rates: Vec<_> = overview
            .rates
            .iter()
            .map(|r| (r.pay_type.as_str(), r.rate))
            .collect();
        assert_eq!(rates, vec![("alipay", 0.03), ("wxpay", 0.02)]);
    }

    #[tokio::test]
    async fn test_overview_fetch_failure_is_internal() {
        let service = OverviewService::new(
            MockRepo::new()
                .with_group(standard_group())
                .failing_stats(),
        );

        let result = service
            .overview(&session(Merchant::new(1, 100, "mk")), day())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_overview_malformed_group_config_is_not_fatal() {
        let broken = PayGroup::new(9, "broken", RawConfig::Text("{oops".into())).as_default();
        let service = OverviewService::new(MockRepo::new().with_group(broken));

        let overview = service
            .overview(&session(Merchant::new(1, 100, "mk")), day())
            .await
            .unwrap();

        assert_eq!(overview.pay_group_name.as_deref(), Some("broken"));
        assert!(overview.rates.is_empty());
    }

    #[tokio::test]
    async fn test_select_pay_group_without_assignment() {
        let service = OverviewService::new(
            MockRepo::new()
                .with_group(standard_group())
                .with_group(vip_group()),
        );

        let group = service
            .select_pay_group(&Merchant::new(1, 100, "mk"))
            .await
            .unwrap();

        assert_eq!(group.map(|g| g.id), Some(1));
    }

    #[test]
    fn test_list_pay_types() {
        let service = OverviewService::new(MockRepo::new());

        let listed = service.list_pay_types(DeviceFilter::Mobile);

        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].name, "alipay");
    }
}
