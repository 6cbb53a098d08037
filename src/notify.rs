//! Transactional billing notifications.
//!
//! Composes ready-to-send [`Email`] values from two-cycle usage summaries and
//! a suggested plan: the over-limit warning, the dashboard-locked notice, and
//! the internal enterprise-overage alert. Delivery is the [`Mailer`] backend's
//! concern, not this module's.
//!
//! [`Mailer`]: crate::email::Mailer

use crate::email::Email;
use crate::plans::{format_volume, Plan, PlanCatalog, PlanKind, VolumeSelection};
use crate::usage::UsageCycle;

/// The plan suggested to a user who has outgrown their subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestedPlan<'a> {
    /// A concrete catalog plan to upgrade to.
    Upgrade(&'a Plan),
    /// Usage exceeds every listed tier.
    Enterprise,
}

impl<'a> SuggestedPlan<'a> {
    /// Suggest a plan for a pageview volume.
    ///
    /// Picks the growth plan at the first accommodating catalog volume,
    /// falling back to the business tier at that volume, or the enterprise
    /// sentinel when every tier is exceeded.
    #[must_use]
    pub fn for_usage(catalog: &'a PlanCatalog, pageviews: u64) -> Self {
        match catalog.default_volume_for_usage(pageviews) {
            VolumeSelection::Enterprise => Self::Enterprise,
            selection @ VolumeSelection::Limit(_) => catalog
                .plan_by_volume(PlanKind::Growth, selection)
                .or_else(|| catalog.plan_by_volume(PlanKind::Business, selection))
                .map_or(Self::Enterprise, Self::Upgrade),
        }
    }
}

/// The two most recent completed billing cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoCycleUsage {
    /// The cycle before last.
    pub penultimate: UsageCycle,
    /// The most recent completed cycle.
    pub last: UsageCycle,
}

impl TwoCycleUsage {
    /// Build from a collaborator-supplied cycle list, oldest first.
    ///
    /// Returns `None` when fewer than two cycles are available.
    #[must_use]
    pub fn from_recent(cycles: &[UsageCycle]) -> Option<Self> {
        match cycles {
            [.., penultimate, last] => Some(Self {
                penultimate: *penultimate,
                last: *last,
            }),
            _ => None,
        }
    }
}

/// A notification recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Display name used in the greeting.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl Recipient {
    /// Create a new recipient.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Composer for billing notification emails.
#[derive(Debug, Clone)]
pub struct NotificationComposer {
    product_name: String,
    base_url: String,
    from_address: String,
    alert_address: String,
}

impl NotificationComposer {
    /// Create a new composer.
    pub fn new(
        product_name: impl Into<String>,
        base_url: impl Into<String>,
        from_address: impl Into<String>,
        alert_address: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            base_url: base_url.into(),
            from_address: from_address.into(),
            alert_address: alert_address.into(),
        }
    }

    /// The self-service upgrade URL.
    #[must_use]
    pub fn upgrade_url(&self) -> String {
        format!("{}/billing/upgrade", self.base_url)
    }

    /// Compose the over-limit warning sent when usage exceeds the
    /// subscription tier.
    #[must_use]
    pub fn over_limit_email(
        &self,
        recipient: &Recipient,
        usage: &TwoCycleUsage,
        suggested: &SuggestedPlan<'_>,
    ) -> Email {
        let subject = format!(
            "[Action required] You have used more than your {} subscription allows",
            self.product_name
        );

        let body = format!(
            "Hey {},\n\n\
             {}\n\n\
             {}\n\n\
             Thanks,\nThe {} Team",
            recipient.name,
            usage_recap(usage),
            self.suggestion_paragraph(suggested),
            self.product_name,
        );

        Email::new(&self.from_address, &recipient.email, subject).text(body)
    }

    /// Compose the notice sent when the dashboard has been locked due to
    /// continued overage.
    #[must_use]
    pub fn dashboard_locked_email(
        &self,
        recipient: &Recipient,
        usage: &TwoCycleUsage,
        suggested: &SuggestedPlan<'_>,
    ) -> Email {
        let subject = format!(
            "[Action required] Your {} dashboard is now locked",
            self.product_name
        );

        let body = format!(
            "Hey {},\n\n\
             Your account has used more than your subscription tier allows for two \
             consecutive billing cycles, so access to your dashboard is now locked.\n\n\
             {}\n\n\
             {}\n\n\
             Thanks,\nThe {} Team",
            recipient.name,
            usage_recap(usage),
            self.suggestion_paragraph(suggested),
            self.product_name,
        );

        Email::new(&self.from_address, &recipient.email, subject).text(body)
    }

    /// Compose the internal alert for an enterprise account over its limits.
    ///
    /// Sent to the configured alert address, not to the user.
    #[must_use]
    pub fn enterprise_over_limit_email(
        &self,
        account_email: &str,
        usage: &TwoCycleUsage,
        site_count: u32,
        site_limit: u32,
    ) -> Email {
        let subject = format!("Enterprise account {account_email} is over its limit");

        let body = format!(
            "The enterprise account {} has outgrown its plan.\n\n\
             {}\n\n\
             Site usage: {} / {} allowed sites",
            account_email,
            usage_recap(usage),
            site_count,
            site_limit,
        );

        Email::new(&self.from_address, &self.alert_address, subject).text(body)
    }

    fn suggestion_paragraph(&self, suggested: &SuggestedPlan<'_>) -> String {
        match suggested {
            SuggestedPlan::Upgrade(plan) => format!(
                "Based on your usage, we recommend you upgrade to the {}/mo plan. \
                 Click here to upgrade your subscription: {}",
                format_volume(plan.monthly_pageview_limit),
                self.upgrade_url(),
            ),
            SuggestedPlan::Enterprise => "Your usage exceeds our standard plans. Please reply \
                 to this email to get a quote for your volume."
                .to_string(),
        }
    }
}

fn usage_recap(usage: &TwoCycleUsage) -> String {
    format!(
        "In the last billing cycle ({}), your account used {} billable pageviews. \
         In the billing cycle before that ({}), it used {} billable pageviews.",
        usage.last.date_range_label(),
        format_count(usage.last.total),
        usage.penultimate.date_range_label(),
        format_count(usage.penultimate.total),
    )
}

/// Format a pageview count with thousands separators.
fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
