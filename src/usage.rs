//! Usage data consumed from an external usage-computation collaborator.
//!
//! The crate never computes billable-event counts itself; it reads snapshots
//! and per-cycle totals through the [`UsageSource`] trait and treats them as
//! immutable for the duration of a render cycle.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plans::Feature;

/// Point-in-time usage for a user.
///
/// Recomputed on each page load; never persisted by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Billable pageviews in the last 30 days.
    pub last_30_days: u64,
    /// Number of active sites on the account.
    pub site_count: u32,
    /// Features the account actively uses.
    pub features_used: Vec<Feature>,
}

/// Usage aggregated over one billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCycle {
    /// First day of the cycle.
    pub start: NaiveDate,
    /// Last day of the cycle.
    pub end: NaiveDate,
    /// Total billable pageviews in the cycle.
    pub total: u64,
}

impl UsageCycle {
    /// Display label for the cycle's date range ("1 Aug 2026 to 31 Aug 2026").
    #[must_use]
    pub fn date_range_label(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%-d %b %Y"),
            self.end.format("%-d %b %Y")
        )
    }
}

/// External collaborator that computes usage for a user.
#[async_trait]
pub trait UsageSource: Send + Sync {
    /// Billable pageviews over the last 30 days.
    async fn last_30_days(&self, user_id: &str) -> Result<u64>;

    /// Number of active sites on the account.
    async fn site_count(&self, user_id: &str) -> Result<u32>;

    /// Features the account actively uses.
    async fn features_used(&self, user_id: &str) -> Result<Vec<Feature>>;

    /// The two most recent completed billing cycles, oldest first.
    async fn last_two_cycles(&self, user_id: &str) -> Result<Vec<UsageCycle>>;

    /// Assemble a full snapshot from the individual queries.
    async fn snapshot(&self, user_id: &str) -> Result<UsageSnapshot> {
        let (last_30_days, site_count, features_used) = futures::try_join!(
            self.last_30_days(user_id),
            self.site_count(user_id),
            self.features_used(user_id),
        )?;

        Ok(UsageSnapshot {
            last_30_days,
            site_count,
            features_used,
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory usage source for testing.
    #[derive(Default)]
    pub struct MockUsageSource {
        snapshots: RwLock<HashMap<String, UsageSnapshot>>,
        cycles: RwLock<HashMap<String, Vec<UsageCycle>>>,
    }

    impl MockUsageSource {
        /// Create an empty mock source.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Set the snapshot returned for a user.
        pub fn set_snapshot(&self, user_id: &str, snapshot: UsageSnapshot) {
            self.snapshots
                .write()
                .unwrap()
                .insert(user_id.to_string(), snapshot);
        }

        /// Set the cycles returned for a user, oldest first.
        pub fn set_cycles(&self, user_id: &str, cycles: Vec<UsageCycle>) {
            self.cycles
                .write()
                .unwrap()
                .insert(user_id.to_string(), cycles);
        }

        fn snapshot_for(&self, user_id: &str) -> UsageSnapshot {
            self.snapshots
                .read()
                .unwrap()
                .get(user_id)
                .cloned()
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl UsageSource for MockUsageSource {
        async fn last_30_days(&self, user_id: &str) -> Result<u64> {
            Ok(self.snapshot_for(user_id).last_30_days)
        }

        async fn site_count(&self, user_id: &str) -> Result<u32> {
            Ok(self.snapshot_for(user_id).site_count)
        }

        async fn features_used(&self, user_id: &str) -> Result<Vec<Feature>> {
            Ok(self.snapshot_for(user_id).features_used)
        }

        async fn last_two_cycles(&self, user_id: &str) -> Result<Vec<UsageCycle>> {
            Ok(self
                .cycles
                .read()
                .unwrap()
                .get(user_id)
                .cloned()
                .unwrap_or_default())
        }
    }
}
