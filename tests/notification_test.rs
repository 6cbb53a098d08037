//! Tests for billing notification composition and delivery.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use planboard::{
    ConsoleMailer, Email, Mailer, NotificationComposer, PlanCatalog, PlanKind, Recipient, Result,
    SuggestedPlan, TwoCycleUsage, UsageCycle,
};

/// Delivery backend that captures emails for assertions.
#[derive(Clone, Default)]
struct CaptureMailer {
    sent: Arc<Mutex<Vec<Email>>>,
}

#[async_trait]
impl Mailer for CaptureMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn composer() -> NotificationComposer {
    NotificationComposer::new(
        "Acme Analytics",
        "https://app.acme.test",
        "billing@acme.test",
        "ops@acme.test",
    )
}

fn cycles() -> TwoCycleUsage {
    TwoCycleUsage {
        penultimate: UsageCycle {
            start: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            total: 210_000,
        },
        last: UsageCycle {
            start: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
            total: 250_000,
        },
    }
}

fn catalog() -> PlanCatalog {
    PlanCatalog::builder()
        .plan(PlanKind::Growth, 100_000)
        .costs("$19", "$190")
        .products("g100m", "g100y")
        .team_members(3)
        .sites(10)
        .done()
        .plan(PlanKind::Growth, 500_000)
        .costs("$49", "$490")
        .products("g500m", "g500y")
        .team_members(3)
        .sites(10)
        .done()
        .build()
}

#[tokio::test]
async fn over_limit_email_recommends_the_next_tier() {
    let catalog = catalog();
    let suggested = SuggestedPlan::for_usage(&catalog, cycles().last.total);
    let recipient = Recipient::new("Jane", "jane@site.test");

    let email = composer().over_limit_email(&recipient, &cycles(), &suggested);

    let mailer = CaptureMailer::default();
    mailer.send(&email).await.unwrap();

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);

    let body = sent[0].text.as_deref().unwrap();
    assert!(body.contains("250,000 billable pageviews"));
    assert!(body.contains("upgrade to the 500k/mo plan"));
    assert!(body.contains("Click here to upgrade"));
    assert!(body.contains("https://app.acme.test/billing/upgrade"));
}

#[tokio::test]
async fn over_limit_email_pivots_to_contact_us_beyond_catalog() {
    let catalog = catalog();
    // 900k exceeds every listed tier
    let suggested = SuggestedPlan::for_usage(&catalog, 900_000);
    assert_eq!(suggested, SuggestedPlan::Enterprise);

    let recipient = Recipient::new("Jane", "jane@site.test");
    let email = composer().over_limit_email(&recipient, &cycles(), &suggested);

    let body = email.text.as_deref().unwrap();
    assert!(body.contains("Your usage exceeds our standard plans"));
    assert!(!body.contains("Click here to upgrade"));

    let mailer = CaptureMailer::default();
    mailer.send(&email).await.unwrap();
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_locked_email_keeps_the_sentinel_pivot() {
    let recipient = Recipient::new("Jane", "jane@site.test");
    let email =
        composer().dashboard_locked_email(&recipient, &cycles(), &SuggestedPlan::Enterprise);

    assert!(email.subject.contains("dashboard is now locked"));
    let body = email.text.as_deref().unwrap();
    assert!(body.contains("Your usage exceeds our standard plans"));
    assert!(!body.contains("/billing/upgrade"));
}

#[tokio::test]
async fn enterprise_alert_reports_site_overage_internally() {
    let email = composer().enterprise_over_limit_email("big@corp.test", &cycles(), 63, 50);

    assert_eq!(email.to, vec!["ops@acme.test"]);
    assert!(email.subject.contains("big@corp.test"));
    assert!(email
        .text
        .as_deref()
        .unwrap()
        .contains("Site usage: 63 / 50 allowed sites"));
}

#[tokio::test]
async fn console_mailer_delivers_composed_notifications() {
    let recipient = Recipient::new("Jane", "jane@site.test");
    let email = composer().over_limit_email(&recipient, &cycles(), &SuggestedPlan::Enterprise);

    let mailer = ConsoleMailer::with_prefix("[TEST]");
    assert!(mailer.send(&email).await.is_ok());
}
