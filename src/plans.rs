//! Plan catalog and definitions.
//!
//! Define your plan tiers with pricing, pageview volumes, and feature sets.
//!
//! # Static Catalogs (Code-configured)
//!
//! Use the builder pattern for catalogs defined in code:
//!
//! ```rust
//! use planboard::plans::{Feature, PlanCatalog, PlanKind};
//!
//! let catalog = PlanCatalog::builder()
//!     .plan(PlanKind::Growth, 10_000)
//!         .costs("$9", "$90")
//!         .products("prod_growth_10k_m", "prod_growth_10k_y")
//!         .team_members(3)
//!         .sites(10)
//!         .retention_years(3)
//!         .done()
//!     .plan(PlanKind::Business, 10_000)
//!         .costs("$19", "$190")
//!         .products("prod_business_10k_m", "prod_business_10k_y")
//!         .team_members(10)
//!         .sites(50)
//!         .retention_years(5)
//!         .features([Feature::Funnels, Feature::RevenueGoals])
//!         .done()
//!     .build();
//! ```
//!
//! # Config-derived Catalogs
//!
//! Use [`PlanCatalog::from_json_str`] for catalogs shipped as JSON config.

use serde::{Deserialize, Serialize};

use crate::error::{PlanboardError, Result};
use crate::subscription::BillingInterval;

/// A named plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Growth,
    Business,
    Enterprise,
}

impl PlanKind {
    /// Display name for the tier.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Growth => "Growth",
            Self::Business => "Business",
            Self::Enterprise => "Enterprise",
        }
    }
}

/// A gated product feature.
///
/// Features are a closed enumeration rather than free-form identifiers so the
/// benefit-phrase lookup stays a plain match with a display-name fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Props,
    Funnels,
    RevenueGoals,
    StatsApi,
    SharedLinks,
    SiteSegments,
}

impl Feature {
    /// Human-readable name of the feature.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Props => "Custom Properties",
            Self::Funnels => "Funnels",
            Self::RevenueGoals => "Revenue Goals",
            Self::StatsApi => "Stats API",
            Self::SharedLinks => "Shared Links",
            Self::SiteSegments => "Site Segments",
        }
    }

    /// Marketing phrase used in benefit lists.
    ///
    /// Falls back to [`display_name`](Self::display_name) for features without
    /// a dedicated phrase.
    #[must_use]
    pub fn benefit_phrase(&self) -> &'static str {
        match self {
            Self::RevenueGoals => "Ecommerce revenue attribution",
            Self::StatsApi => "Stats API access",
            other => other.display_name(),
        }
    }
}

/// Team-member allowance for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberLimit {
    Limited(u32),
    Unlimited,
}

impl MemberLimit {
    /// Benefit phrase for the allowance ("Up to 3 team members").
    #[must_use]
    pub fn phrase(&self) -> String {
        match self {
            Self::Limited(n) => format!("Up to {n} team members"),
            Self::Unlimited => "Unlimited team members".to_string(),
        }
    }
}

/// The user's in-page volume choice.
///
/// `Enterprise` is the sentinel for "beyond every listed tier" and never
/// resolves to a concrete plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSelection {
    Limit(u64),
    Enterprise,
}

impl VolumeSelection {
    /// Check if this is the enterprise sentinel.
    #[must_use]
    pub fn is_enterprise(&self) -> bool {
        matches!(self, Self::Enterprise)
    }
}

/// An immutable plan definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan tier.
    pub kind: PlanKind,
    /// Catalog generation this plan belongs to.
    pub generation: u32,
    /// Monthly billable pageview allowance.
    pub monthly_pageview_limit: u64,
    /// Display price for monthly billing (e.g. "$9").
    pub monthly_cost: String,
    /// Display price for yearly billing (e.g. "$90").
    pub yearly_cost: String,
    /// Team-member allowance.
    pub team_member_limit: MemberLimit,
    /// Maximum number of sites.
    pub site_limit: u32,
    /// Data retention in years (None = no stated figure).
    pub data_retention_years: Option<u32>,
    /// Features included in this plan.
    pub features: Vec<Feature>,
    /// Payment-provider product ID for monthly billing.
    pub monthly_product_id: String,
    /// Payment-provider product ID for yearly billing.
    pub yearly_product_id: String,
}

impl Plan {
    /// Check if this plan includes a feature.
    #[must_use]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Payment-provider product ID for the given billing interval.
    #[must_use]
    pub fn product_id(&self, interval: BillingInterval) -> &str {
        match interval {
            BillingInterval::Monthly => &self.monthly_product_id,
            BillingInterval::Yearly => &self.yearly_product_id,
        }
    }

    /// Short volume label for display ("10k", "100k", "1M").
    #[must_use]
    pub fn volume_label(&self) -> String {
        format_volume(self.monthly_pageview_limit)
    }
}

/// Format a pageview volume as a short label.
#[must_use]
pub fn format_volume(volume: u64) -> String {
    const MILLION: u64 = 1_000_000;
    const THOUSAND: u64 = 1_000;

    if volume >= MILLION && volume % MILLION == 0 {
        format!("{}M", volume / MILLION)
    } else if volume >= THOUSAND && volume % THOUSAND == 0 {
        format!("{}k", volume / THOUSAND)
    } else {
        volume.to_string()
    }
}

/// A catalog snapshot of available plans.
///
/// Invariant: at most one plan per (kind, volume, generation) combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Load a catalog from a JSON array of plans.
    ///
    /// Returns an error when the JSON is malformed or the catalog violates the
    /// one-plan-per-(kind, volume, generation) invariant.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let plans: Vec<Plan> = serde_json::from_str(json)
            .map_err(|e| PlanboardError::invalid_catalog(e.to_string()))?;
        let catalog = Self { plans };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the catalog invariant.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for plan in &self.plans {
            let key = (plan.kind, plan.monthly_pageview_limit, plan.generation);
            if !seen.insert(key) {
                return Err(PlanboardError::invalid_catalog(format!(
                    "duplicate plan for {} at volume {} (generation {})",
                    plan.kind.display_name(),
                    plan.monthly_pageview_limit,
                    plan.generation,
                )));
            }
        }
        Ok(())
    }

    /// Add a single plan.
    pub fn add(&mut self, plan: Plan) {
        self.plans.push(plan);
    }

    /// Get the number of plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Check if the catalog has no plans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Iterate over all plans.
    pub fn iter(&self) -> impl Iterator<Item = &Plan> {
        self.plans.iter()
    }

    /// The ordered list of distinct pageview volumes in this catalog.
    ///
    /// This drives the volume slider: one position per volume plus a trailing
    /// enterprise slot.
    #[must_use]
    pub fn volumes(&self) -> Vec<u64> {
        let mut volumes: Vec<u64> = self.plans.iter().map(|p| p.monthly_pageview_limit).collect();
        volumes.sort_unstable();
        volumes.dedup();
        volumes
    }

    /// Find the plan for a tier at an exact volume.
    ///
    /// The enterprise sentinel never resolves to a concrete plan.
    #[must_use]
    pub fn plan_by_volume(&self, kind: PlanKind, selection: VolumeSelection) -> Option<&Plan> {
        match selection {
            VolumeSelection::Enterprise => None,
            VolumeSelection::Limit(volume) => self
                .plans
                .iter()
                .find(|p| p.kind == kind && p.monthly_pageview_limit == volume),
        }
    }

    /// Find a plan by payment-provider product ID (either interval).
    #[must_use]
    pub fn find_by_product_id(&self, product_id: &str) -> Option<&Plan> {
        self.plans
            .iter()
            .find(|p| p.monthly_product_id == product_id || p.yearly_product_id == product_id)
    }

    /// Default volume for a user without an owned plan.
    ///
    /// The first catalog volume strictly greater than their last-30-day usage,
    /// or the enterprise sentinel when every tier is exceeded.
    #[must_use]
    pub fn default_volume_for_usage(&self, last_30_days: u64) -> VolumeSelection {
        self.volumes()
            .into_iter()
            .find(|v| *v > last_30_days)
            .map_or(VolumeSelection::Enterprise, VolumeSelection::Limit)
    }
}

/// Builder for constructing a plan catalog.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    plans: Vec<Plan>,
    generation: u32,
}

impl CatalogBuilder {
    /// Create a new catalog builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog generation applied to subsequently defined plans.
    #[must_use]
    pub fn generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    /// Start defining a new plan at the given tier and volume.
    #[must_use]
    pub fn plan(self, kind: PlanKind, volume: u64) -> PlanBuilder {
        let generation = self.generation;
        PlanBuilder {
            parent: self,
            plan: Plan {
                kind,
                generation,
                monthly_pageview_limit: volume,
                monthly_cost: String::new(),
                yearly_cost: String::new(),
                team_member_limit: MemberLimit::Limited(1),
                site_limit: 1,
                data_retention_years: None,
                features: Vec::new(),
                monthly_product_id: String::new(),
                yearly_product_id: String::new(),
            },
        }
    }

    /// Build the catalog.
    ///
    /// # Panics
    ///
    /// Panics if two plans share a (kind, volume, generation) combination.
    #[must_use]
    pub fn build(self) -> PlanCatalog {
        let catalog = PlanCatalog { plans: self.plans };
        catalog
            .validate()
            .expect("catalog must have one plan per (kind, volume, generation)");
        catalog
    }

    fn add_plan(mut self, plan: Plan) -> Self {
        self.plans.push(plan);
        self
    }
}

/// Builder for a single plan definition.
#[derive(Debug)]
pub struct PlanBuilder {
    parent: CatalogBuilder,
    plan: Plan,
}

impl PlanBuilder {
    /// Set the monthly and yearly display prices.
    #[must_use]
    pub fn costs(mut self, monthly: &str, yearly: &str) -> Self {
        self.plan.monthly_cost = monthly.to_string();
        self.plan.yearly_cost = yearly.to_string();
        self
    }

    /// Set the payment-provider product IDs for monthly and yearly billing.
    #[must_use]
    pub fn products(mut self, monthly: &str, yearly: &str) -> Self {
        self.plan.monthly_product_id = monthly.to_string();
        self.plan.yearly_product_id = yearly.to_string();
        self
    }

    /// Limit team members to the given count.
    #[must_use]
    pub fn team_members(mut self, count: u32) -> Self {
        self.plan.team_member_limit = MemberLimit::Limited(count);
        self
    }

    /// Allow unlimited team members.
    #[must_use]
    pub fn unlimited_team_members(mut self) -> Self {
        self.plan.team_member_limit = MemberLimit::Unlimited;
        self
    }

    /// Set the site limit.
    #[must_use]
    pub fn sites(mut self, count: u32) -> Self {
        self.plan.site_limit = count;
        self
    }

    /// Set the data retention figure in years.
    #[must_use]
    pub fn retention_years(mut self, years: u32) -> Self {
        self.plan.data_retention_years = Some(years);
        self
    }

    /// Add features to this plan.
    #[must_use]
    pub fn features<I>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = Feature>,
    {
        self.plan.features.extend(features);
        self
    }

    /// Add a single feature to this plan.
    #[must_use]
    pub fn feature(mut self, feature: Feature) -> Self {
        self.plan.features.push(feature);
        self
    }

    /// Finish defining this plan and return to the catalog builder.
    #[must_use]
    pub fn done(self) -> CatalogBuilder {
        self.parent.add_plan(self.plan)
    }
}
