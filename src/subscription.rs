//! Read-only view of the billing provider's subscription state.
//!
//! The subscription lifecycle is owned by the payment provider; this module
//! only interprets the synced status and billing interval.

use serde::{Deserialize, Serialize};

/// Subscription status as synced from the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is active and paid.
    Active,
    /// Payment failed, subscription still exists but past due.
    PastDue,
    /// Subscription is paused.
    Paused,
    /// Subscription has been deleted/canceled.
    Deleted,
}

impl SubscriptionStatus {
    /// Parse from the provider's status string.
    ///
    /// Unknown statuses map to `Deleted`.
    #[must_use]
    pub fn from_provider(status: &str) -> Self {
        match status {
            "active" => Self::Active,
            "past_due" => Self::PastDue,
            "paused" => Self::Paused,
            _ => Self::Deleted,
        }
    }

    /// Convert to the provider's status string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Paused => "paused",
            Self::Deleted => "deleted",
        }
    }

    /// Check if the subscription is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self == Self::Active
    }

    /// Check if billing details need updating before a new checkout.
    #[must_use]
    pub fn is_billing_expired(&self) -> bool {
        matches!(self, Self::Paused | Self::PastDue)
    }

    /// Check if the subscription is deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        *self == Self::Deleted
    }
}

/// Billing interval for a subscription or checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    #[default]
    Monthly,
    Yearly,
}

impl BillingInterval {
    /// Parse a UI-supplied interval value.
    ///
    /// Only the exact strings "monthly" and "yearly" are accepted; anything
    /// else is a client-contract violation and yields `None`.
    #[must_use]
    pub fn from_input(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Convert to the wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A user's subscription as read from the billing provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Payment-provider product ID the subscription is linked to.
    pub product_id: String,
    /// Billing interval.
    pub interval: BillingInterval,
    /// Provider-synced status.
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// Check if the subscription is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_provider() {
        assert_eq!(
            SubscriptionStatus::from_provider("active"),
            SubscriptionStatus::Active
        );
        assert_eq!(
            SubscriptionStatus::from_provider("past_due"),
            SubscriptionStatus::PastDue
        );
        assert_eq!(
            SubscriptionStatus::from_provider("paused"),
            SubscriptionStatus::Paused
        );
        assert_eq!(
            SubscriptionStatus::from_provider("deleted"),
            SubscriptionStatus::Deleted
        );
        // Unknown statuses degrade to deleted
        assert_eq!(
            SubscriptionStatus::from_provider("???"),
            SubscriptionStatus::Deleted
        );
    }

    #[test]
    fn test_status_predicates() {
        assert!(SubscriptionStatus::Active.is_active());
        assert!(!SubscriptionStatus::Active.is_billing_expired());
        assert!(SubscriptionStatus::PastDue.is_billing_expired());
        assert!(SubscriptionStatus::Paused.is_billing_expired());
        assert!(SubscriptionStatus::Deleted.is_deleted());
        assert!(!SubscriptionStatus::Deleted.is_billing_expired());
    }

    #[test]
    fn test_interval_from_input_is_strict() {
        assert_eq!(
            BillingInterval::from_input("monthly"),
            Some(BillingInterval::Monthly)
        );
        assert_eq!(
            BillingInterval::from_input("yearly"),
            Some(BillingInterval::Yearly)
        );
        assert_eq!(BillingInterval::from_input("Monthly"), None);
        assert_eq!(BillingInterval::from_input("weekly"), None);
        assert_eq!(BillingInterval::from_input(""), None);
    }

    #[test]
    fn test_interval_round_trip() {
        for interval in [BillingInterval::Monthly, BillingInterval::Yearly] {
            assert_eq!(BillingInterval::from_input(interval.as_str()), Some(interval));
        }
    }
}
