//! Planboard - plan selection, eligibility gating, and billing notifications
//!
//! Planboard implements the interactive plan-selection flow of a SaaS billing
//! page as pure, session-scoped logic: a plan catalog, a selection state
//! machine driven by UI events, checkout eligibility rules, per-tier benefit
//! lists, and transactional billing notifications. External collaborators
//! (usage computation, mail delivery) sit behind narrow async traits.
//!
//! # Quick Start
//!
//! ```rust
//! use planboard::{Feature, PlanCatalog, PlanKind, PlanSelection};
//!
//! let catalog = PlanCatalog::builder()
//!     .plan(PlanKind::Growth, 10_000)
//!         .costs("$9", "$90")
//!         .products("prod_g10_m", "prod_g10_y")
//!         .team_members(3)
//!         .sites(10)
//!         .done()
//!     .plan(PlanKind::Growth, 100_000)
//!         .costs("$19", "$190")
//!         .products("prod_g100_m", "prod_g100_y")
//!         .team_members(3)
//!         .sites(10)
//!         .feature(Feature::SharedLinks)
//!         .done()
//!     .build();
//!
//! // Page-load defaults for a user with 5k pageviews and no plan
//! let mut selection = PlanSelection::new(&catalog, None, None, 5_000);
//!
//! // UI events
//! selection.set_interval("yearly");
//! selection.slide(&catalog, 1);
//!
//! assert_eq!(selection.growth_plan().unwrap().monthly_pageview_limit, 100_000);
//! ```

pub mod benefits;
pub mod eligibility;
pub mod email;
mod error;
pub mod notify;
pub mod plans;
pub mod selection;
pub mod subscription;
pub mod usage;

// Re-exports for the public API
pub use benefits::{business_benefits, enterprise_benefits, growth_benefits, Benefit};
pub use eligibility::{
    can_subscribe, downgrade_warning, features_lost, plan_accommodates, CheckoutAvailability,
};
pub use email::{ConsoleMailer, Email, Mailer};
pub use error::{PlanboardError, Result};
pub use notify::{NotificationComposer, Recipient, SuggestedPlan, TwoCycleUsage};
pub use plans::{
    format_volume, CatalogBuilder, Feature, MemberLimit, Plan, PlanBuilder, PlanCatalog, PlanKind,
    VolumeSelection,
};
pub use selection::PlanSelection;
pub use subscription::{BillingInterval, Subscription, SubscriptionStatus};
pub use usage::{UsageCycle, UsageSnapshot, UsageSource};

#[cfg(any(test, feature = "test-support"))]
pub use email::test::RecordingMailer;

#[cfg(any(test, feature = "test-support"))]
pub use usage::test::MockUsageSource;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults.
///
/// Call this early in your application, before handling UI events.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "planboard=debug")
/// - `PLANBOARD_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("PLANBOARD_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
