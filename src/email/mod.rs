//! Email values and the delivery boundary.
//!
//! Notification composition in this crate produces [`Email`] values; actual
//! delivery goes through the [`Mailer`] trait so applications can plug in
//! SMTP, a third-party provider, or the console backend for development.
//!
//! # Example
//!
//! ```rust
//! use planboard::email::{ConsoleMailer, Email, Mailer};
//!
//! # async fn example() -> planboard::Result<()> {
//! let mailer = ConsoleMailer::new();
//! let email = Email::new("billing@example.com", "user@example.com", "Welcome!")
//!     .text("Thanks for signing up!");
//! mailer.send(&email).await?;
//! # Ok(())
//! # }
//! ```

mod console;

pub use console::ConsoleMailer;

use async_trait::async_trait;

use crate::error::{PlanboardError, Result};

/// An email message to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// CC recipients.
    pub cc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain text body (optional if html is provided).
    pub text: Option<String>,
    /// HTML body (optional if text is provided).
    pub html: Option<String>,
    /// Reply-to address.
    pub reply_to: Option<String>,
}

impl Email {
    /// Create a new email with the required fields.
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            cc: Vec::new(),
            subject: subject.into(),
            text: None,
            html: None,
            reply_to: None,
        }
    }

    /// Add a recipient.
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.to.push(recipient.into());
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, recipient: impl Into<String>) -> Self {
        self.cc.push(recipient.into());
        self
    }

    /// Set the plain text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    /// Set the HTML body.
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Set the reply-to address.
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Validate the email has the required fields.
    pub fn validate(&self) -> Result<()> {
        if self.from.is_empty() {
            return Err(PlanboardError::bad_request("Email 'from' is required"));
        }
        if self.to.is_empty() {
            return Err(PlanboardError::bad_request("Email 'to' is required"));
        }
        if self.subject.is_empty() {
            return Err(PlanboardError::bad_request("Email 'subject' is required"));
        }
        if self.text.is_none() && self.html.is_none() {
            return Err(PlanboardError::bad_request(
                "Email must have either 'text' or 'html' body",
            ));
        }
        Ok(())
    }
}

/// Trait for email delivery backends.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email.
    async fn send(&self, email: &Email) -> Result<()>;

    /// Check if the backend is available.
    fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test {
    use super::*;
    use std::sync::{Arc, RwLock};

    /// Mailer that records sent emails instead of delivering them.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingMailer {
        sent: Arc<RwLock<Vec<Email>>>,
    }

    impl RecordingMailer {
        /// Create a new recording mailer.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All emails sent so far.
        #[must_use]
        pub fn sent(&self) -> Vec<Email> {
            self.sent.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &Email) -> Result<()> {
            email.validate()?;
            self.sent.write().unwrap().push(email.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_builder() {
        let email = Email::new("from@test.com", "to@test.com", "Subject")
            .text("Plain body")
            .cc("cc@test.com")
            .reply_to("reply@test.com");

        assert_eq!(email.from, "from@test.com");
        assert_eq!(email.to, vec!["to@test.com"]);
        assert_eq!(email.cc, vec!["cc@test.com"]);
        assert_eq!(email.text, Some("Plain body".to_string()));
        assert_eq!(email.reply_to, Some("reply@test.com".to_string()));
    }

    #[test]
    fn test_email_validation_requires_body() {
        let email = Email::new("from@test.com", "to@test.com", "Subject");
        let err = email.validate().unwrap_err();
        assert!(err.to_string().contains("body"));
    }

    #[test]
    fn test_email_validation_requires_subject() {
        let email = Email::new("from@test.com", "to@test.com", "").text("body");
        assert!(email.validate().is_err());
    }

    #[tokio::test]
    async fn test_recording_mailer_captures_sent() {
        let mailer = test::RecordingMailer::new();
        let email = Email::new("from@test.com", "to@test.com", "Subject").text("body");

        mailer.send(&email).await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Subject");
    }
}
