//! In-page plan selection state.
//!
//! The selection is session-transient: created with page-load defaults,
//! mutated only by UI events, and discarded when the session ends. Each
//! transition fully redefines the state; invalid inputs are rejected with no
//! observable change.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plans::{Plan, PlanCatalog, PlanKind, VolumeSelection};
use crate::subscription::{BillingInterval, Subscription};
use crate::usage::UsageSource;

/// The user's in-progress plan selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSelection {
    interval: BillingInterval,
    volume: VolumeSelection,
    growth: Option<Plan>,
    business: Option<Plan>,
}

impl PlanSelection {
    /// Create the page-load default selection.
    ///
    /// Volume defaults to the owned plan's limit when the user has one,
    /// otherwise to the first catalog volume strictly greater than their
    /// last-30-day usage (enterprise sentinel when none qualifies). Interval
    /// defaults to the subscription's interval, or monthly.
    #[must_use]
    pub fn new(
        catalog: &PlanCatalog,
        owned_plan: Option<&Plan>,
        subscription: Option<&Subscription>,
        last_30_days: u64,
    ) -> Self {
        let volume = match owned_plan {
            Some(plan) => VolumeSelection::Limit(plan.monthly_pageview_limit),
            None => catalog.default_volume_for_usage(last_30_days),
        };
        let interval = subscription.map(|s| s.interval).unwrap_or_default();

        let mut selection = Self {
            interval,
            volume,
            growth: None,
            business: None,
        };
        selection.resolve_plans(catalog);
        selection
    }

    /// Create the page-load default selection, fetching last-30-day usage
    /// from the usage collaborator.
    pub async fn for_user(
        catalog: &PlanCatalog,
        usage: &dyn UsageSource,
        user_id: &str,
        owned_plan: Option<&Plan>,
        subscription: Option<&Subscription>,
    ) -> Result<Self> {
        let last_30_days = usage.last_30_days(user_id).await?;
        Ok(Self::new(catalog, owned_plan, subscription, last_30_days))
    }

    /// The selected billing interval.
    #[must_use]
    pub fn interval(&self) -> BillingInterval {
        self.interval
    }

    /// The selected volume tier.
    #[must_use]
    pub fn volume(&self) -> VolumeSelection {
        self.volume
    }

    /// The growth-tier plan matching the selected volume, if any.
    #[must_use]
    pub fn growth_plan(&self) -> Option<&Plan> {
        self.growth.as_ref()
    }

    /// The business-tier plan matching the selected volume, if any.
    #[must_use]
    pub fn business_plan(&self) -> Option<&Plan> {
        self.business.as_ref()
    }

    /// Handle an interval toggle event.
    ///
    /// Only "monthly" and "yearly" are accepted; anything else is a client
    /// contract violation and leaves the state untouched.
    pub fn set_interval(&mut self, value: &str) {
        match BillingInterval::from_input(value) {
            Some(interval) => self.interval = interval,
            None => {
                tracing::debug!(
                    target: "planboard::selection",
                    value,
                    "ignoring unrecognized billing interval"
                );
            }
        }
    }

    /// Handle a volume slider event.
    ///
    /// `index` positions into the ordered catalog volumes plus one trailing
    /// enterprise slot: `index == volumes.len()` selects the enterprise
    /// sentinel. Out-of-range indexes are rejected with no state change.
    /// Idempotent.
    pub fn slide(&mut self, catalog: &PlanCatalog, index: usize) {
        let volumes = catalog.volumes();

        self.volume = if index == volumes.len() {
            VolumeSelection::Enterprise
        } else if let Some(volume) = volumes.get(index) {
            VolumeSelection::Limit(*volume)
        } else {
            tracing::debug!(
                target: "planboard::selection",
                index,
                slots = volumes.len() + 1,
                "ignoring out-of-range slider index"
            );
            return;
        };

        self.resolve_plans(catalog);
    }

    /// Re-derive the per-tier plan references for the current volume.
    fn resolve_plans(&mut self, catalog: &PlanCatalog) {
        self.growth = catalog.plan_by_volume(PlanKind::Growth, self.volume).cloned();
        self.business = catalog
            .plan_by_volume(PlanKind::Business, self.volume)
            .cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::SubscriptionStatus;

    fn catalog() -> PlanCatalog {
        let mut builder = PlanCatalog::builder();
        for (i, volume) in [10_000u64, 100_000, 200_000].iter().enumerate() {
            builder = builder
                .plan(PlanKind::Growth, *volume)
                .costs("$9", "$90")
                .products(&format!("g{i}m"), &format!("g{i}y"))
                .team_members(3)
                .sites(10)
                .done()
                .plan(PlanKind::Business, *volume)
                .costs("$39", "$390")
                .products(&format!("b{i}m"), &format!("b{i}y"))
                .team_members(10)
                .sites(50)
                .done();
        }
        builder.build()
    }

    #[test]
    fn test_default_volume_without_owned_plan() {
        let catalog = catalog();
        let selection = PlanSelection::new(&catalog, None, None, 5_000);
        assert_eq!(selection.volume(), VolumeSelection::Limit(10_000));
        assert_eq!(selection.interval(), BillingInterval::Monthly);
        assert!(selection.growth_plan().is_some());
        assert!(selection.business_plan().is_some());
    }

    #[test]
    fn test_default_volume_with_owned_plan_ignores_usage() {
        let catalog = catalog();
        let owned = catalog
            .plan_by_volume(PlanKind::Growth, VolumeSelection::Limit(100_000))
            .unwrap()
            .clone();
        let selection = PlanSelection::new(&catalog, Some(&owned), None, 3_000);
        assert_eq!(selection.volume(), VolumeSelection::Limit(100_000));
    }

    #[test]
    fn test_default_volume_beyond_catalog_is_enterprise() {
        let catalog = catalog();
        let selection = PlanSelection::new(&catalog, None, None, 900_000);
        assert_eq!(selection.volume(), VolumeSelection::Enterprise);
        assert!(selection.growth_plan().is_none());
        assert!(selection.business_plan().is_none());
    }

    #[test]
    fn test_default_interval_from_subscription() {
        let catalog = catalog();
        let sub = Subscription {
            product_id: "g1y".to_string(),
            interval: BillingInterval::Yearly,
            status: SubscriptionStatus::Active,
        };
        let selection = PlanSelection::new(&catalog, None, Some(&sub), 5_000);
        assert_eq!(selection.interval(), BillingInterval::Yearly);
    }

    #[test]
    fn test_set_interval_rejects_invalid_input() {
        let catalog = catalog();
        let mut selection = PlanSelection::new(&catalog, None, None, 5_000);

        selection.set_interval("yearly");
        assert_eq!(selection.interval(), BillingInterval::Yearly);

        selection.set_interval("quarterly");
        assert_eq!(selection.interval(), BillingInterval::Yearly);
    }

    #[test]
    fn test_slide_selects_volume_and_resolves_plans() {
        let catalog = catalog();
        let mut selection = PlanSelection::new(&catalog, None, None, 5_000);

        selection.slide(&catalog, 2);
        assert_eq!(selection.volume(), VolumeSelection::Limit(200_000));
        assert_eq!(
            selection.growth_plan().unwrap().monthly_pageview_limit,
            200_000
        );
        assert_eq!(
            selection.business_plan().unwrap().monthly_pageview_limit,
            200_000
        );
    }

    #[test]
    fn test_slide_trailing_slot_is_enterprise() {
        let catalog = catalog();
        let mut selection = PlanSelection::new(&catalog, None, None, 5_000);

        selection.slide(&catalog, 3);
        assert_eq!(selection.volume(), VolumeSelection::Enterprise);
        assert!(selection.growth_plan().is_none());
        assert!(selection.business_plan().is_none());
    }

    #[test]
    fn test_slide_out_of_range_is_rejected() {
        let catalog = catalog();
        let mut selection = PlanSelection::new(&catalog, None, None, 5_000);
        let before = selection.clone();

        selection.slide(&catalog, 4);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_slide_is_idempotent() {
        let catalog = catalog();
        let mut once = PlanSelection::new(&catalog, None, None, 5_000);
        once.slide(&catalog, 1);

        let mut twice = PlanSelection::new(&catalog, None, None, 5_000);
        twice.slide(&catalog, 1);
        twice.slide(&catalog, 1);

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_for_user_fetches_usage() {
        use crate::usage::test::MockUsageSource;
        use crate::usage::UsageSnapshot;

        let catalog = catalog();
        let source = MockUsageSource::new();
        source.set_snapshot(
            "user_1",
            UsageSnapshot {
                last_30_days: 150_000,
                site_count: 4,
                features_used: vec![],
            },
        );

        let selection = PlanSelection::for_user(&catalog, &source, "user_1", None, None)
            .await
            .unwrap();
        assert_eq!(selection.volume(), VolumeSelection::Limit(200_000));
    }
}
