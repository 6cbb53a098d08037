//! Benefit list derivation for plan tiers.
//!
//! Benefit lists are derived, never stored. The Business list is the diff
//! against the paired Growth list; the diff is computed over semantic
//! [`Benefit`] values and only rendered to text afterwards, so two tiers
//! sharing a limit never show the same line twice regardless of phrasing.

use crate::plans::{Feature, MemberLimit, Plan, PlanKind};

/// Fixed marketing lines shown on the growth tier.
const GROWTH_MARKETING: [&str; 3] = [
    "Intuitive, fast and easy to use",
    "Email/Slack reports",
    "Google Analytics import",
];

/// Enterprise-tier API allowance line.
const ENTERPRISE_API_RATE: &str = "600 requests per hour API rate limit";

/// A single benefit, kept semantic until rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Benefit {
    /// "Everything in {tier}" marker.
    EverythingIn(PlanKind),
    /// Team-member allowance.
    TeamMembers(MemberLimit),
    /// Open-ended team-member allowance ("10+ team members").
    TeamMembersOver(u32),
    /// Site allowance.
    Sites(u32),
    /// Open-ended site allowance ("50+ sites").
    SitesOver(u32),
    /// Data retention in years.
    Retention(u32),
    /// Open-ended retention ("5+ years of data retention").
    RetentionOver(u32),
    /// Fixed marketing line.
    Marketing(&'static str),
    /// Included feature.
    Feature(Feature),
    /// Priority support.
    PrioritySupport,
    /// Enterprise API allowance.
    ApiRate,
    /// Sites API access for reselling.
    ResellingAccess,
    /// Technical onboarding.
    TechnicalOnboarding,
}

impl Benefit {
    /// Render the benefit as display text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::EverythingIn(kind) => format!("Everything in {}", kind.display_name()),
            Self::TeamMembers(limit) => limit.phrase(),
            Self::TeamMembersOver(n) => format!("{n}+ team members"),
            Self::Sites(n) => format!("Up to {n} sites"),
            Self::SitesOver(n) => format!("{n}+ sites"),
            Self::Retention(years) => format!("{years} years of data retention"),
            Self::RetentionOver(years) => format!("{years}+ years of data retention"),
            Self::Marketing(line) => (*line).to_string(),
            Self::Feature(feature) => feature.benefit_phrase().to_string(),
            Self::PrioritySupport => "Priority support".to_string(),
            Self::ApiRate => ENTERPRISE_API_RATE.to_string(),
            Self::ResellingAccess => "Sites API access for reselling".to_string(),
            Self::TechnicalOnboarding => "Technical onboarding".to_string(),
        }
    }
}

fn render_all(items: Vec<Benefit>) -> Vec<String> {
    items
        .into_iter()
        .map(|b| b.render())
        .filter(|line| !line.is_empty())
        .collect()
}

fn growth_items(plan: &Plan) -> Vec<Benefit> {
    let mut items = vec![
        Benefit::TeamMembers(plan.team_member_limit),
        Benefit::Sites(plan.site_limit),
    ];
    if let Some(years) = plan.data_retention_years {
        items.push(Benefit::Retention(years));
    }
    items.extend(GROWTH_MARKETING.map(Benefit::Marketing));
    items.extend(plan.features.iter().copied().map(Benefit::Feature));
    items
}

fn business_items(plan: &Plan) -> Vec<Benefit> {
    let mut items = vec![
        Benefit::EverythingIn(PlanKind::Growth),
        Benefit::TeamMembers(plan.team_member_limit),
        Benefit::Sites(plan.site_limit),
    ];
    if let Some(years) = plan.data_retention_years {
        items.push(Benefit::Retention(years));
    }
    items.extend(plan.features.iter().copied().map(Benefit::Feature));
    items.push(Benefit::PrioritySupport);
    items
}

/// Benefit list for a growth-tier plan.
#[must_use]
pub fn growth_benefits(plan: &Plan) -> Vec<String> {
    render_all(growth_items(plan))
}

/// Benefit list for a business-tier plan.
///
/// Entries already present in the paired growth plan's list are removed;
/// the remaining entries keep their Business order.
#[must_use]
pub fn business_benefits(plan: &Plan, growth: Option<&Plan>) -> Vec<String> {
    let shown_on_growth: Vec<Benefit> = growth.map(growth_items).unwrap_or_default();
    let items = business_items(plan)
        .into_iter()
        .filter(|item| !shown_on_growth.contains(item))
        .collect();
    render_all(items)
}

/// Fixed narrative benefit list for the enterprise tier.
///
/// The upgraded team-member and retention phrases only appear when the paired
/// business plan is capped at 10 members / 5 years respectively.
#[must_use]
pub fn enterprise_benefits(business: Option<&Plan>) -> Vec<String> {
    let business_capped_members = business
        .map(|p| p.team_member_limit == MemberLimit::Limited(10))
        .unwrap_or(false);
    let business_capped_retention = business
        .map(|p| p.data_retention_years == Some(5))
        .unwrap_or(false);

    let mut items = vec![Benefit::EverythingIn(PlanKind::Business)];
    if business_capped_members {
        items.push(Benefit::TeamMembersOver(10));
    }
    items.push(Benefit::SitesOver(50));
    items.push(Benefit::ApiRate);
    items.push(Benefit::ResellingAccess);
    if business_capped_retention {
        items.push(Benefit::RetentionOver(5));
    }
    items.push(Benefit::TechnicalOnboarding);

    render_all(items)
}
