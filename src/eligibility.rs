//! Eligibility gating for plan checkout.
//!
//! Pure decisions: given a usage snapshot, the user's subscription state, and
//! a candidate plan, decide whether checkout is available and what copy to
//! show when it is not. Ineligibility is a first-class UI state here, never an
//! error.

use crate::plans::{Feature, Plan};
use crate::subscription::{BillingInterval, Subscription};
use crate::usage::UsageSnapshot;

/// Outcome of a checkout eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CheckoutAvailability {
    /// Checkout is available.
    Enabled,
    /// The candidate is the user's current plan and interval.
    DisabledCurrentPlan,
    /// Current usage exceeds the candidate plan's limits.
    BlockedUsage,
    /// Billing details are expired (paused or past-due subscription).
    BlockedBilling,
    /// Account has no active sites; checkout is replaced by a contact flow.
    ContactOnly,
}

impl CheckoutAvailability {
    /// Check if checkout is available.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Explanatory copy for a disabled checkout, if any.
    ///
    /// `ContactOnly` intentionally has no copy; the UI swaps the checkout
    /// button for a contact affordance instead.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Enabled | Self::ContactOnly => None,
            Self::DisabledCurrentPlan => Some("Currently on this plan"),
            Self::BlockedUsage => Some("Your usage exceeds this plan"),
            Self::BlockedBilling => Some("Please update your billing details first"),
        }
    }
}

/// Decide whether the user may subscribe to a candidate plan.
///
/// Rules are evaluated in order, first match wins:
///
/// 1. zero active sites — contact-only flow
/// 2. candidate is the current plan and interval (re-subscription is allowed
///    when the existing subscription is deleted)
/// 3. usage exceeds the candidate's volume, site, or feature limits
/// 4. billing details expired (paused or past-due)
/// 5. otherwise enabled
pub fn can_subscribe(
    usage: &UsageSnapshot,
    subscription: Option<&Subscription>,
    owned_plan: Option<&Plan>,
    candidate: &Plan,
    interval: BillingInterval,
) -> CheckoutAvailability {
    if usage.site_count == 0 {
        return CheckoutAvailability::ContactOnly;
    }

    if let (Some(sub), Some(owned)) = (subscription, owned_plan) {
        let same_plan = owned == candidate && sub.interval == interval;
        if same_plan && !sub.status.is_deleted() {
            return CheckoutAvailability::DisabledCurrentPlan;
        }
    }

    if !plan_accommodates(candidate, usage) {
        return CheckoutAvailability::BlockedUsage;
    }

    if let Some(sub) = subscription {
        if sub.status.is_billing_expired() {
            return CheckoutAvailability::BlockedBilling;
        }
    }

    CheckoutAvailability::Enabled
}

/// Check whether a plan accommodates the given usage.
///
/// Monotonic: a snapshot accommodated by plan P is accommodated by any plan
/// with a volume limit >= P's, a site limit >= P's, and a feature superset.
#[must_use]
pub fn plan_accommodates(plan: &Plan, usage: &UsageSnapshot) -> bool {
    usage.last_30_days <= plan.monthly_pageview_limit
        && u64::from(usage.site_count) <= u64::from(plan.site_limit)
        && usage.features_used.iter().all(|f| plan.has_feature(*f))
}

/// Features the account uses that the candidate plan does not offer.
///
/// Order follows the usage snapshot's feature order.
#[must_use]
pub fn features_lost(usage: &UsageSnapshot, candidate: &Plan) -> Vec<Feature> {
    usage
        .features_used
        .iter()
        .copied()
        .filter(|f| !candidate.has_feature(*f))
        .collect()
}

/// Human-readable downgrade warning for a non-empty feature-loss set.
///
/// Shown as a confirmation prompt before committing to a downgrade. Returns
/// `None` when nothing would be lost.
#[must_use]
pub fn downgrade_warning(lost: &[Feature]) -> Option<String> {
    let names: Vec<&str> = lost.iter().map(|f| f.display_name()).collect();

    match names.as_slice() {
        [] => None,
        [single] => Some(format!(
            "By subscribing to this plan you will lose access to this feature: {single}."
        )),
        [head @ .., last] => Some(format!(
            "By subscribing to this plan you will lose access to these features: {} and {last}.",
            head.join(", ")
        )),
    }
}
